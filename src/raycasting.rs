/*

Fixed step ray march. Not a DDA grid stepper.

ray angle: a
ray direction: (cos_a, sin_a)

The ray advances by `step` until it leaves the world, runs past `max_length`
or lands inside a solid cell/rectangle. The face that was hit is guessed from
which pair of edges the settled point is closer to.

*/

use crate::{config::Config, game::{Probe, Solid, WorldModel}, geometry::{clamp01, Rect}};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
	/// Left or right side of a cell. Textured along world Y.
	Vertical,
	/// Top or bottom side of a cell. Textured along world X.
	Horizontal
}

impl Face {
	pub fn from_hit(position: glam::Vec2, bounds: &Rect) -> Self {
		let edge = bounds.edge_distances(position);
		if edge.x < edge.y { Face::Vertical } else { Face::Horizontal }
	}

	/// Fraction `[0, 1]` of the way along this face of `bounds` where `position` lies.
	pub fn offset(self, position: glam::Vec2, bounds: &Rect) -> f32 {
		let offset = match self {
			Face::Vertical => (position.y - bounds.y) / bounds.height,
			Face::Horizontal => (position.x - bounds.x) / bounds.width
		};
		clamp01(offset)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
	pub material: u32,
	pub bounds: Rect,
	pub tile: Option<glam::UVec2>,
	pub face: Face,
	/// Where along the face the ray landed, `[0, 1]`.
	pub hit_x: f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCast {
	pub origin: glam::Vec2,
	pub angle: f32,
	pub direction: glam::Vec2,
	/// Distance travelled when the march stopped, hit or not.
	pub distance: f32,
	/// Where the march stopped.
	pub position: glam::Vec2,
	pub hit: Option<Hit>
}

impl RayCast {
	pub fn is_hit(&self) -> bool {
		self.hit.is_some()
	}
}

pub fn single_raycast<W: WorldModel + ?Sized>(
	world: &W, from: glam::Vec2, angle: f32, step: f32, max_length: f32
) -> RayCast {
	let direction = glam::Vec2::from_angle(angle);
	let mut distance = 0.0f32;
	let mut position = from;

	while distance < max_length {
		distance += step;
		position = from + direction * distance;

		match world.probe(position) {
			Probe::Open => continue,
			Probe::OutOfBounds => break,
			Probe::Solid(Solid { material, bounds, tile }) => {
				let face = Face::from_hit(position, &bounds);
				let hit_x = face.offset(position, &bounds);
				return RayCast {
					origin: from, angle, direction, distance, position,
					hit: Some(Hit { material, bounds, tile, face, hit_x })
				};
			}
		}
	}

	RayCast { origin: from, angle, direction, distance, position, hit: None }
}

/// One cast per screen column, left to right.
pub fn multiple_raycast<W: WorldModel + ?Sized>(
	world: &W, from: glam::Vec2, heading: f32, config: &Config
) -> Vec<RayCast> {
	(0..config.ray_count).map(|i|
		single_raycast(world, from, config.ray_angle(heading, i), config.ray_step, config.max_ray_length)
	).collect()
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::game::{TileMap, TileType, Obstacles};

	#[test]
	fn open_world_runs_to_max_length() {
		let tilemap = TileMap::empty(40, 40, 64.0);
		let from = tilemap.world_size() * 0.5;
		for i in 0..16 {
			let cast = single_raycast(&tilemap, from, i as f32 * 0.4, 1.0, 1000.0);
			assert!(!cast.is_hit());
			assert!(cast.distance >= 1000.0 && cast.distance < 1001.0);
		}
	}

	#[test]
	fn leaving_grid_is_a_miss() {
		let tilemap = TileMap::empty(4, 4, 64.0);
		let cast = single_raycast(&tilemap, glam::vec2(32.0, 32.0), 0.0, 1.0, 1000.0);
		assert!(!cast.is_hit());
		assert!(cast.distance < 1000.0);
		assert!(cast.position.x >= 256.0);
	}

	#[test]
	fn axis_aligned_hit_distance_within_one_step() {
		let mut tilemap = TileMap::empty(10, 3, 64.0);
		tilemap.set_tile(glam::uvec2(7, 1), TileType::Wall(3));
		let from = glam::vec2(100.0, 96.0);
		for step in [0.5, 1.0, 2.5] {
			let cast = single_raycast(&tilemap, from, 0.0, step, 1000.0);
			let hit = cast.hit.expect("wall straight ahead");
			let expected = 7.0 * 64.0 - from.x;
			assert!(cast.distance >= expected && cast.distance - expected <= step);
			assert_eq!(hit.material, 3);
			assert_eq!(hit.tile, Some(glam::uvec2(7, 1)));
			assert_eq!(hit.face, Face::Vertical);
		}
	}

	#[test]
	fn face_orientation_from_edge_distance() {
		let bounds = Rect::new(64.0, 64.0, 64.0, 64.0);
		assert_eq!(Face::from_hit(glam::vec2(64.5, 90.0), &bounds), Face::Vertical);
		assert_eq!(Face::from_hit(glam::vec2(90.0, 127.5), &bounds), Face::Horizontal);
	}

	#[test]
	fn offset_follows_face() {
		let bounds = Rect::new(128.0, 64.0, 64.0, 64.0);
		assert_eq!(Face::Vertical.offset(glam::vec2(128.0, 80.0), &bounds), 0.25);
		assert_eq!(Face::Horizontal.offset(glam::vec2(176.0, 64.0), &bounds), 0.75);
		assert_eq!(Face::Horizontal.offset(glam::vec2(200.0, 64.0), &bounds), 1.0);
		assert_eq!(Face::Horizontal.offset(glam::vec2(100.0, 64.0), &bounds), 0.0);
	}

	#[test]
	fn hit_records_offset_along_face() {
		let mut tilemap = TileMap::empty(10, 3, 64.0);
		tilemap.set_tile(glam::uvec2(7, 1), TileType::Wall(1));
		// lands on the west side of tile (7,1) a quarter of the way down
		let cast = single_raycast(&tilemap, glam::vec2(100.0, 80.0), 0.0, 1.0, 1000.0);
		let hit = cast.hit.expect("wall straight ahead");
		assert_eq!(hit.face, Face::Vertical);
		assert_eq!(hit.hit_x, 0.25);
	}

	#[test]
	fn rectangle_world_hit() {
		let obstacles = Obstacles::test_obstacles();
		let cast = single_raycast(&obstacles, glam::vec2(400.0, 182.0), 0.0, 1.0, 1000.0);
		let hit = cast.hit.expect("obstacle ahead");
		assert_eq!(cast.distance, 100.0);
		assert_eq!(hit.tile, None);
		assert_eq!(hit.face, Face::Vertical);
	}

	#[test]
	fn one_cast_per_ray() {
		let config = Config::default();
		let tilemap = TileMap::test_tilemap(&config);
		let casts = multiple_raycast(&tilemap, glam::vec2(160.0, 160.0), 1.0, &config);
		assert_eq!(casts.len(), config.ray_count as usize);
		assert!(casts.iter().all(|c| c.is_hit()));
	}
}
