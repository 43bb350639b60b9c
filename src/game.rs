use anyhow::ensure;

use crate::{asset::TextureId, config::Config, geometry::{self, Rect}};

mod collision;

pub use collision::{footprint_blocked_by_objects, is_position_blocked};

//
// World model
//

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileType { Empty, Wall(u32) }

impl TileType {
	/// 0 is empty space, anything else is a wall material id.
	pub fn from_code(code: u32) -> Self {
		match code {
			0 => TileType::Empty,
			id => TileType::Wall(id)
		}
	}
	pub fn is_solid(&self) -> bool {
		matches!(self, TileType::Wall(_))
	}
}

/// Obstructing cell or rectangle found at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid {
	pub material: u32,
	pub bounds: Rect,
	pub tile: Option<glam::UVec2>
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Probe { Open, OutOfBounds, Solid(Solid) }

/// What the ray caster, the controller and the minimap need from a world.
pub trait WorldModel {
	fn probe(&self, point: glam::Vec2) -> Probe;
	fn footprint_blocked(&self, footprint: &Rect) -> bool;
	fn solids(&self) -> Vec<Solid>;
}

#[derive(Clone, Debug)]
pub struct TileMap {
	data: Vec<TileType>,
	width: u32,
	height: u32,
	tile_size: f32
}

impl TileMap {
	pub fn empty(width: u32, height: u32, tile_size: f32) -> Self {
		Self { data: vec![TileType::Empty; (width * height) as usize], width, height, tile_size }
	}

	pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], tile_size: f32) -> anyhow::Result<Self> {
		ensure!(!rows.is_empty(), "tilemap needs at least one row");
		let width = rows[0].as_ref().len();
		ensure!(width > 0, "tilemap rows must not be empty");
		ensure!(tile_size > 0.0, "tile size must be positive, got {tile_size}");

		let mut data = Vec::with_capacity(width * rows.len());
		for (y, row) in rows.iter().enumerate() {
			let row = row.as_ref();
			ensure!(row.len() == width, "tilemap row {y} has {} tiles, expected {width}", row.len());
			data.extend(row.iter().map(|code| TileType::from_code(*code)));
		}

		Ok(Self { data, width: width as u32, height: rows.len() as u32, tile_size })
	}

	/// Demo layout stamped into a `grid_width` x `grid_height` grid. The outer ring is always wall.
	pub fn test_tilemap(config: &Config) -> Self {
		// [0] floor [1] brick gray [2] brick dark gray [3] brick dark blue
		const TEST_TILEMAP: [[u32; 15]; 10] = [
			[2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 1, 1, 1, 1, 1],
			[2, 0, 0, 0, 2, 3, 0, 0, 0, 3, 0, 0, 0, 0, 1],
			[2, 0, 0, 0, 2, 3, 0, 0, 0, 3, 0, 0, 0, 0, 1],
			[2, 0, 0, 0, 2, 3, 0, 0, 0, 3, 0, 0, 0, 0, 1],
			[2, 2, 0, 2, 2, 3, 3, 0, 3, 3, 0, 0, 0, 0, 1],
			[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
			[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
			[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
			[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
			[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
		];

		let (width, height) = (config.grid_width, config.grid_height);
		let mut tilemap = TileMap::empty(width, height, config.tile_size);
		for y in 0..height {
			for x in 0..width {
				let code = TEST_TILEMAP.get(y as usize).and_then(|row| row.get(x as usize)).copied().unwrap_or(0);
				let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
				let tile = match TileType::from_code(code) {
					TileType::Empty if border => TileType::Wall(1),
					tile => tile
				};
				tilemap.set_tile(glam::uvec2(x, y), tile);
			}
		}
		tilemap
	}

	pub fn set_tile(&mut self, coord: glam::UVec2, tile: TileType) {
		if coord.x < self.width && coord.y < self.height {
			self.data[(coord.y * self.width + coord.x) as usize] = tile;
		}
	}

	pub fn get_tile(&self, coord: glam::UVec2) -> Option<TileType> {
		if coord.x >= self.width || coord.y >= self.height {
			return None;
		}
		self.data.get((coord.y * self.width + coord.x) as usize).copied()
	}

	pub fn width(&self) -> u32 { self.width }
	pub fn height(&self) -> u32 { self.height }
	pub fn tile_size(&self) -> f32 { self.tile_size }

	pub fn world_size(&self) -> glam::Vec2 {
		glam::uvec2(self.width, self.height).as_vec2() * self.tile_size
	}

	/// Signed tile coordinate of a world point. May lie outside the grid.
	pub fn point_to_tile(&self, point: glam::Vec2) -> glam::IVec2 {
		(point / self.tile_size).floor().as_ivec2()
	}

	pub fn tile_in_bounds(&self, tile: glam::IVec2) -> Option<glam::UVec2> {
		if tile.x < 0 || tile.y < 0 || tile.x >= self.width as i32 || tile.y >= self.height as i32 {
			return None;
		}
		Some(tile.as_uvec2())
	}

	pub fn tile_bounds(&self, coord: glam::UVec2) -> Rect {
		let origin = coord.as_vec2() * self.tile_size;
		Rect::new(origin.x, origin.y, self.tile_size, self.tile_size)
	}
}

impl WorldModel for TileMap {
	fn probe(&self, point: glam::Vec2) -> Probe {
		let Some(coord) = self.tile_in_bounds(self.point_to_tile(point)) else {
			return Probe::OutOfBounds;
		};
		match self.get_tile(coord) {
			Some(TileType::Wall(material)) => Probe::Solid(Solid {
				material, bounds: self.tile_bounds(coord), tile: Some(coord)
			}),
			Some(TileType::Empty) => Probe::Open,
			None => Probe::OutOfBounds
		}
	}

	// Every tile touched by the footprint must exist and be empty.
	fn footprint_blocked(&self, footprint: &Rect) -> bool {
		let min = self.point_to_tile(footprint.position());
		let max = self.point_to_tile(glam::vec2(footprint.right(), footprint.bottom()));
		if self.tile_in_bounds(min).is_none() || self.tile_in_bounds(max).is_none() {
			return true;
		}
		(min.y..=max.y).any(|y| (min.x..=max.x).any(|x|
			self.get_tile(glam::uvec2(x as u32, y as u32)).map_or(true, |tile| tile.is_solid())
		))
	}

	fn solids(&self) -> Vec<Solid> {
		self.data.iter().enumerate().filter_map(|(idx, tile)| match tile {
			TileType::Empty => None,
			TileType::Wall(material) => {
				let coord = glam::uvec2(idx as u32 % self.width, idx as u32 / self.width);
				Some(Solid { material: *material, bounds: self.tile_bounds(coord), tile: Some(coord) })
			}
		}).collect()
	}
}

/// Wall rectangle for scenes without a tile grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
	pub bounds: Rect,
	pub material: u32
}

#[derive(Clone, Debug, Default)]
pub struct Obstacles {
	obstacles: Vec<Obstacle>,
	extent: Option<Rect>
}

impl Obstacles {
	pub fn new(obstacles: Vec<Obstacle>) -> Self {
		Self { obstacles, extent: None }
	}

	/// Points outside `extent` count as out of bounds.
	pub fn with_extent(mut self, extent: Rect) -> Self {
		self.extent = Some(extent);
		self
	}

	pub fn test_obstacles() -> Self {
		Self::new(vec![Obstacle { bounds: Rect::new(500.0, 150.0, 64.0, 64.0), material: 1 }])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
		self.obstacles.iter()
	}
}

impl WorldModel for Obstacles {
	fn probe(&self, point: glam::Vec2) -> Probe {
		if let Some(obstacle) = self.obstacles.iter().find(|o| o.bounds.contains(point)) {
			return Probe::Solid(Solid { material: obstacle.material, bounds: obstacle.bounds, tile: None });
		}
		match self.extent {
			Some(extent) if !extent.contains(point) => Probe::OutOfBounds,
			_ => Probe::Open
		}
	}

	fn footprint_blocked(&self, footprint: &Rect) -> bool {
		if let Some(extent) = self.extent {
			if footprint.left() < extent.left() || footprint.top() < extent.top()
				|| footprint.right() > extent.right() || footprint.bottom() > extent.bottom() {
				return true;
			}
		}
		self.obstacles.iter().any(|o| o.bounds.overlaps(footprint))
	}

	fn solids(&self) -> Vec<Solid> {
		self.obstacles.iter().map(|o| Solid { material: o.material, bounds: o.bounds, tile: None }).collect()
	}
}

//
// Entities
//

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Player {
	pub position: glam::Vec2,
	pub angle: f32,
	pub speed: f32,
	pub radius: f32
}

impl Player {
	pub fn forward_vector(&self) -> glam::Vec2 {
		glam::Vec2::from_angle(self.angle)
	}
	pub fn footprint(&self) -> Rect {
		Rect::square_around(self.position, self.radius)
	}
}

/// Billboard that is both drawn and collided against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticObject {
	pub position: glam::Vec2,
	pub texture: TextureId,
	pub scale: f32,
	pub radius: f32
}

/// Digital inputs sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
	pub turn_left: bool,
	pub turn_right: bool,
	pub move_forward: bool,
	pub move_backward: bool
}

pub struct GameWorld<W: WorldModel> {
	world: W,
	player: Player,
	objects: Vec<StaticObject>
}

impl<W: WorldModel> GameWorld<W> {
	pub fn new(world: W, player: Player, objects: Vec<StaticObject>) -> Self {
		Self { world, player, objects }
	}

	pub fn world(&self) -> &W { &self.world }
	pub fn objects(&self) -> &[StaticObject] { &self.objects }
	pub fn player(&self) -> &Player { &self.player }

	pub fn get_player_position(&self) -> glam::Vec2 {
		self.player.position
	}
	pub fn get_player_angle(&self) -> f32 {
		self.player.angle
	}
	pub fn get_player_forward_vector(&self) -> glam::Vec2 {
		self.player.forward_vector()
	}

	pub fn rotate_player(&mut self, wishang: f32) {
		self.player.angle = geometry::wrap_heading(self.player.angle + wishang);
	}

	/// Moves the player, or leaves it exactly where it was if the new spot is blocked.
	pub fn translate_player(&mut self, wishvec: glam::Vec2) -> bool {
		let old_position = self.player.position;
		self.player.position += wishvec;
		if is_position_blocked(&self.world, &self.objects, self.player.position, self.player.radius) {
			log::debug!("move to {:?} rejected, rolled back to {:?}", self.player.position, old_position);
			self.player.position = old_position;
			return false;
		}
		true
	}

	/// One controller step: turn, then move with all or nothing rollback.
	pub fn control(&mut self, controls: &Controls, config: &Config) {
		if controls.turn_left { self.rotate_player(-config.turn_rate); }
		if controls.turn_right { self.rotate_player(config.turn_rate); }

		let forward = self.get_player_forward_vector() * self.player.speed;
		let mut wishvec = glam::Vec2::ZERO;
		if controls.move_forward { wishvec += forward; }
		if controls.move_backward { wishvec -= forward; }
		if wishvec != glam::Vec2::ZERO {
			self.translate_player(wishvec);
		}
	}
}

impl GameWorld<TileMap> {
	pub fn test_gameworld(config: &Config, object_texture: TextureId) -> Self {
		let tile_size = config.tile_size;
		let spawn = glam::vec2(2.0, 2.0);
		GameWorld {
			world: TileMap::test_tilemap(config),
			player: Player {
				position: spawn * tile_size + tile_size * 0.5,
				angle: 1.0,
				speed: config.player_speed,
				radius: 12.0
			},
			objects: vec![StaticObject {
				position: glam::vec2(3.5, 5.5) * tile_size,
				texture: object_texture,
				scale: config.sprite_scale,
				radius: 20.0
			}]
		}
	}
}

impl GameWorld<Obstacles> {
	pub fn test_rect_world(config: &Config) -> Self {
		GameWorld {
			world: Obstacles::test_obstacles(),
			player: Player {
				position: glam::vec2(config.screen_width as f32, config.screen_height as f32) * 0.5,
				angle: 0.0,
				speed: config.player_speed,
				radius: 6.0
			},
			objects: Vec::new()
		}
	}
}


#[test]
fn test_tilemap_layout() {
	let tilemap = TileMap::test_tilemap(&Config::default());
	assert_eq!(tilemap.get_tile(glam::uvec2(0, 0)), Some(TileType::Wall(2)));
	assert_eq!(tilemap.get_tile(glam::uvec2(1, 1)), Some(TileType::Empty));
	assert_eq!(tilemap.get_tile(glam::uvec2(14, 9)), Some(TileType::Wall(1)));
	assert_eq!(tilemap.get_tile(glam::uvec2(15, 0)), None);
}

#[test]
fn test_tilemap_follows_grid_dimensions() {
	let config = Config { grid_width: 20, grid_height: 6, tile_size: 32.0, ..Default::default() };
	let tilemap = TileMap::test_tilemap(&config);
	assert_eq!((tilemap.width(), tilemap.height()), (20, 6));
	assert_eq!(tilemap.world_size(), glam::vec2(640.0, 192.0));
	// cropped rows and padded columns stay closed
	assert_eq!(tilemap.get_tile(glam::uvec2(7, 5)), Some(TileType::Wall(1)));
	assert_eq!(tilemap.get_tile(glam::uvec2(19, 3)), Some(TileType::Wall(1)));
	assert_eq!(tilemap.get_tile(glam::uvec2(16, 3)), Some(TileType::Empty));
	assert_eq!(tilemap.get_tile(glam::uvec2(1, 1)), Some(TileType::Empty));
	assert_eq!(tilemap.get_tile(glam::uvec2(0, 0)), Some(TileType::Wall(2)));
}

#[test]
fn tilemap_probe() {
	let tilemap = TileMap::test_tilemap(&Config::default());
	assert_eq!(tilemap.probe(glam::vec2(100.0, 100.0)), Probe::Open);
	assert_eq!(tilemap.probe(glam::vec2(-1.0, 100.0)), Probe::OutOfBounds);
	assert_eq!(tilemap.probe(glam::vec2(100.0, 640.0)), Probe::OutOfBounds);
	match tilemap.probe(glam::vec2(10.0, 10.0)) {
		Probe::Solid(solid) => {
			assert_eq!(solid.material, 2);
			assert_eq!(solid.tile, Some(glam::uvec2(0, 0)));
			assert_eq!(solid.bounds, Rect::new(0.0, 0.0, 64.0, 64.0));
		},
		other => panic!("expected a wall, got {other:?}")
	}
}

#[test]
fn from_rows_rejects_ragged_rows() {
	let rows: [&[u32]; 2] = [&[1, 1, 1], &[1, 0]];
	assert!(TileMap::from_rows(&rows, 64.0).is_err());
	let rows = [[1, 1], [1, 0]];
	let tilemap = TileMap::from_rows(&rows, 32.0).unwrap();
	assert_eq!(tilemap.width(), 2);
	assert_eq!(tilemap.solids().len(), 3);
}

#[test]
fn obstacles_probe_and_footprint() {
	let obstacles = Obstacles::test_obstacles();
	assert!(matches!(obstacles.probe(glam::vec2(510.0, 160.0)), Probe::Solid(Solid { material: 1, tile: None, .. })));
	assert_eq!(obstacles.probe(glam::vec2(10.0, 10.0)), Probe::Open);
	assert!(obstacles.footprint_blocked(&Rect::square_around(glam::vec2(497.0, 160.0), 6.0)));
	assert!(!obstacles.footprint_blocked(&Rect::square_around(glam::vec2(480.0, 160.0), 6.0)));

	let bounded = Obstacles::new(Vec::new()).with_extent(Rect::new(0.0, 0.0, 100.0, 100.0));
	assert_eq!(bounded.probe(glam::vec2(150.0, 50.0)), Probe::OutOfBounds);
}

#[test]
fn rotation_wraps_heading() {
	let config = Config::default();
	let mut game_world = GameWorld::test_rect_world(&config);
	game_world.rotate_player(-0.5);
	assert!(game_world.get_player_angle() >= 0.0);
	assert!((game_world.get_player_angle() - (std::f32::consts::TAU - 0.5)).abs() < 1e-5);
}
