use crate::geometry::Rect;

use super::{StaticObject, WorldModel};

/// Circle against circle test used for billboards.
pub fn footprint_blocked_by_objects(objects: &[StaticObject], position: glam::Vec2, radius: f32) -> bool {
	objects.iter().any(|obj| position.distance(obj.position) < radius + obj.radius)
}

/// True if a player of `radius` standing on `position` penetrates the world or an object.
pub fn is_position_blocked<W: WorldModel + ?Sized>(
	world: &W, objects: &[StaticObject], position: glam::Vec2, radius: f32
) -> bool {
	world.footprint_blocked(&Rect::square_around(position, radius))
		|| footprint_blocked_by_objects(objects, position, radius)
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::{asset::TextureId, config::Config, game::{Controls, GameWorld, TileMap, TileType, Player}};

	fn room_world(player: Player) -> GameWorld<TileMap> {
		let mut tilemap = TileMap::empty(10, 10, 64.0);
		for x in 1..=3 {
			for y in 1..=3 {
				if x != 2 || y != 2 {
					tilemap.set_tile(glam::uvec2(x, y), TileType::Wall(1));
				}
			}
		}
		GameWorld::new(tilemap, player, Vec::new())
	}

	#[test]
	fn footprint_touching_wall_tile_is_blocked() {
		let tilemap = TileMap::test_tilemap(&Config::default());
		// tile (1,1) is open, tile (0,1) is a wall
		assert!(!is_position_blocked(&tilemap, &[], glam::vec2(96.0, 96.0), 12.0));
		assert!(is_position_blocked(&tilemap, &[], glam::vec2(70.0, 96.0), 12.0));
	}

	#[test]
	fn footprint_leaving_grid_is_blocked() {
		let tilemap = TileMap::empty(4, 4, 64.0);
		assert!(!is_position_blocked(&tilemap, &[], glam::vec2(20.0, 20.0), 12.0));
		assert!(is_position_blocked(&tilemap, &[], glam::vec2(5.0, 20.0), 12.0));
		assert!(is_position_blocked(&tilemap, &[], glam::vec2(20.0, 250.0), 12.0));
	}

	#[test]
	fn object_radius_blocks() {
		let objects = [StaticObject { position: glam::vec2(100.0, 100.0), texture: TextureId::default(), scale: 90.0, radius: 20.0 }];
		assert!(footprint_blocked_by_objects(&objects, glam::vec2(125.0, 100.0), 12.0));
		assert!(!footprint_blocked_by_objects(&objects, glam::vec2(133.0, 100.0), 12.0));
	}

	#[test]
	fn blocked_move_rolls_back_exactly() {
		let config = Config { player_speed: 10.0, ..Default::default() };
		let start = glam::vec2(160.0, 160.0);
		let mut game_world = room_world(Player { position: start, angle: 0.3, speed: config.player_speed, radius: 12.0 });

		for _ in 0..4 {
			game_world.control(&Controls { move_forward: true, ..Default::default() }, &config);
		}
		// the third step would reach into the east wall column, so it and every later step are refused
		let pos = game_world.get_player_position();
		assert!(pos.x + 12.0 < 192.0);

		let before = game_world.get_player_position();
		game_world.control(&Controls { move_forward: true, ..Default::default() }, &config);
		assert_eq!(game_world.get_player_position(), before);
	}

	#[test]
	fn diagonal_into_corner_is_rejected_not_slid() {
		let config = Config::default();
		let start = glam::vec2(178.0, 178.0);
		let mut game_world = room_world(Player { position: start, angle: std::f32::consts::FRAC_PI_4, speed: 3.0, radius: 12.0 });
		game_world.control(&Controls { move_forward: true, ..Default::default() }, &config);
		assert_eq!(game_world.get_player_position(), start);
	}

	#[test]
	fn rotation_survives_rollback() {
		let config = Config::default();
		let start = glam::vec2(178.0, 178.0);
		let mut game_world = room_world(Player { position: start, angle: std::f32::consts::FRAC_PI_4, speed: 3.0, radius: 12.0 });
		game_world.control(&Controls { turn_right: true, move_forward: true, ..Default::default() }, &config);
		assert_eq!(game_world.get_player_position(), start);
		assert!((game_world.get_player_angle() - (std::f32::consts::FRAC_PI_4 + config.turn_rate)).abs() < 1e-6);
	}
}
