use std::f32::consts::FRAC_PI_2;

use tilecaster::{
	asset::{Texture, TextureId, TextureRegistry},
	config::Config,
	firstperson::{projection::correct_fisheye, sprite::project_sprite, Renderer},
	game::{GameWorld, Player, StaticObject, TileMap, TileType},
	raycasting::{multiple_raycast, single_raycast, Face},
	rendering::DrawCommand
};

// 10x10 grid, ring of wall 1 over tiles (1,1)..(3,3), open cell at (2,2)
fn closed_room() -> TileMap {
	let mut tilemap = TileMap::empty(10, 10, 64.0);
	for y in 1..=3 {
		for x in 1..=3 {
			if (x, y) != (2, 2) {
				tilemap.set_tile(glam::uvec2(x, y), TileType::Wall(1));
			}
		}
	}
	tilemap
}

fn player_at(position: glam::Vec2, angle: f32) -> Player {
	Player { position, angle, speed: 3.0, radius: 12.0 }
}

fn textures() -> (TextureRegistry, TextureId) {
	let mut textures = TextureRegistry::new();
	let brick = textures.insert(Texture::checker(64, 8, [180, 180, 180, 255], [90, 90, 90, 255]));
	textures.bind_material(1, brick).unwrap();
	let pot = textures.insert(Texture::checker(32, 4, [40, 160, 40, 255], [0, 0, 0, 0]));
	(textures, pot)
}

#[test]
fn room_first_ray_is_half_a_tile_away() {
	let config = Config::default();
	let tilemap = closed_room();
	let center = glam::vec2(160.0, 160.0);

	let casts = multiple_raycast(&tilemap, center, 0.0, &config);
	assert_eq!(casts.len(), 240);
	assert!(casts.iter().all(|cast| cast.is_hit()));

	let first = casts[0];
	let corrected = correct_fisheye(first.distance, first.angle, 0.0);
	assert!((corrected - 32.0).abs() <= config.ray_step, "corrected {corrected}");
	assert_eq!(first.hit.unwrap().face, Face::Vertical);

	let middle = casts[120];
	assert!((middle.distance - 32.0).abs() < 1e-3);
	assert_eq!(middle.hit.unwrap().tile, Some(glam::uvec2(3, 2)));
}

#[test]
fn room_face_matches_wall_orientation() {
	let tilemap = closed_room();
	let center = glam::vec2(160.0, 160.0);

	let east = single_raycast(&tilemap, center, 0.0, 1.0, 1000.0);
	let south = single_raycast(&tilemap, center, FRAC_PI_2, 1.0, 1000.0);
	let west = single_raycast(&tilemap, center, std::f32::consts::PI, 1.0, 1000.0);

	assert_eq!(east.hit.unwrap().face, Face::Vertical);
	assert_eq!(west.hit.unwrap().face, Face::Vertical);
	assert_eq!(south.hit.unwrap().face, Face::Horizontal);
	assert_eq!(south.hit.unwrap().tile, Some(glam::uvec2(2, 3)));
}

#[test]
fn empty_grid_never_hits() {
	let config = Config { ray_count: 60, ..Default::default() };
	let tilemap = TileMap::empty(8, 8, 64.0);
	for heading in [0.0, 1.0, 2.5, 4.0, 5.5] {
		let casts = multiple_raycast(&tilemap, glam::vec2(256.0, 256.0), heading, &config);
		assert!(casts.iter().all(|cast| !cast.is_hit()));
		assert!(casts.iter().all(|cast| cast.distance <= config.max_ray_length + config.ray_step));
	}
}

#[test]
fn sprite_behind_wall_is_hidden() {
	let config = Config::default();
	let (textures, pot) = textures();
	let object = StaticObject { position: glam::vec2(320.0, 160.0), texture: pot, scale: config.sprite_scale, radius: 20.0 };
	let game_world = GameWorld::new(closed_room(), player_at(glam::vec2(160.0, 160.0), 0.0), vec![object]);

	// in view, only the wall is nearer
	assert!(project_sprite(game_world.get_player_position(), 0.0, object.position, object.scale, &config).is_some());

	let mut renderer = Renderer::new(config);
	let commands = renderer.render(&game_world, &textures);
	assert_eq!(commands.len(), 2 + 240);
	assert!(!commands.iter().any(|command| matches!(command, DrawCommand::Texture { texture, .. } if *texture == pot)));
}

#[test]
fn sprite_in_the_open_is_centered() {
	let config = Config::default();
	let (textures, pot) = textures();
	let eye = glam::vec2(320.0, 320.0);
	let object = StaticObject { position: eye + glam::vec2(200.0, 0.0), texture: pot, scale: config.sprite_scale, radius: 20.0 };
	let game_world = GameWorld::new(TileMap::empty(20, 20, 64.0), player_at(eye, 0.0), vec![object]);

	let projection = project_sprite(eye, 0.0, object.position, object.scale, &config).unwrap();
	assert!(projection.relative_angle.abs() < 1e-6);
	assert!((projection.center_x - 400.0).abs() < 0.5);
	assert!((projection.size - 600.0 * 90.0 / 200.0).abs() < 1e-3);

	let mut renderer = Renderer::new(config);
	let commands = renderer.render(&game_world, &textures);
	let slices: Vec<_> = commands.iter().filter_map(|command| match command {
		DrawCommand::Texture { texture, dst, .. } if *texture == pot => Some(*dst),
		_ => None
	}).collect();
	assert!(!slices.is_empty());
	assert!(slices.iter().all(|dst| dst.x >= projection.left - 1e-3 && dst.x < projection.right));
	assert!(slices.iter().all(|dst| (dst.y - (300.0 - projection.size / 2.0)).abs() < 1e-3));
}

#[test]
fn blocked_move_rolls_back_exactly() {
	let config = Config::default();
	let mut game_world = GameWorld::new(closed_room(), player_at(glam::vec2(160.0, 160.0), 0.0), Vec::new());

	// 32 units to the east wall, footprint half width 12
	assert!(game_world.translate_player(glam::vec2(19.0, 0.0)));
	let before = *game_world.player();
	assert!(!game_world.translate_player(glam::vec2(config.player_speed, 0.0)));
	assert_eq!(*game_world.player(), before);
}
