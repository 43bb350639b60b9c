use std::{f32::consts::PI, time::Duration};

use anyhow::ensure;

/// Tunables of the whole pipeline. Defaults reproduce the demo scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	pub screen_width: u32,
	pub screen_height: u32,

	/// March step length. Smaller is more accurate and slower.
	pub ray_step: f32,
	pub ray_count: u32,
	pub fov: f32,
	pub max_ray_length: f32,

	pub tile_size: f32,
	/// Size in tiles of the demo map.
	pub grid_width: u32,
	pub grid_height: u32,
	/// Numerator scale of the projected column height.
	pub wall_scale: f32,
	/// Corrected distances are clamped to at least this before dividing.
	pub near_clip: f32,

	pub max_shade_distance: f32,
	pub texturing: bool,
	pub shading: bool,
	pub sprites: bool,

	pub player_speed: f32,
	pub turn_rate: f32,
	pub sprite_scale: f32,

	pub frame_rate: u32,
	pub minimap_scale: f32
}

impl Default for Config {
	fn default() -> Self {
		Self {
			screen_width: 800,
			screen_height: 600,
			ray_step: 1.0,
			ray_count: 240,
			fov: 60.0f32.to_radians(),
			max_ray_length: 1000.0,
			tile_size: 64.0,
			grid_width: 15,
			grid_height: 10,
			wall_scale: 50.0,
			near_clip: 1e-3,
			max_shade_distance: 800.0,
			texturing: true,
			shading: false,
			sprites: true,
			player_speed: 3.0,
			turn_rate: 0.05,
			sprite_scale: 90.0,
			frame_rate: 60,
			minimap_scale: 0.5
		}
	}
}

impl Config {
	pub fn validate(&self) -> anyhow::Result<()> {
		ensure!(self.screen_width > 0 && self.screen_height > 0, "screen size must be non-zero, got {}x{}", self.screen_width, self.screen_height);
		ensure!(self.ray_step > 0.0, "ray step must be positive, got {}", self.ray_step);
		ensure!(self.ray_count > 0, "ray count must be non-zero");
		ensure!(self.fov > 0.0 && self.fov < PI, "field of view must lie in (0, PI), got {}", self.fov);
		ensure!(self.max_ray_length > 0.0, "max ray length must be positive, got {}", self.max_ray_length);
		ensure!(self.tile_size > 0.0, "tile size must be positive, got {}", self.tile_size);
		ensure!(self.grid_width >= 3 && self.grid_height >= 3, "grid must be at least 3x3 tiles, got {}x{}", self.grid_width, self.grid_height);
		ensure!(self.wall_scale > 0.0, "wall scale must be positive, got {}", self.wall_scale);
		ensure!(self.near_clip > 0.0, "near clip must be positive, got {}", self.near_clip);
		ensure!(self.max_shade_distance > 0.0, "max shade distance must be positive, got {}", self.max_shade_distance);
		ensure!(self.frame_rate > 0, "frame rate must be non-zero");
		Ok(())
	}

	pub fn half_fov(&self) -> f32 {
		self.fov * 0.5
	}

	/// Screen width covered by one ray.
	pub fn column_width(&self) -> f32 {
		self.screen_width as f32 / self.ray_count as f32
	}

	/// Angle of ray `index`, spread evenly over `[heading - fov/2, heading + fov/2)`.
	pub fn ray_angle(&self, heading: f32, index: u32) -> f32 {
		heading - self.half_fov() + (index as f32 / self.ray_count as f32) * self.fov
	}

	pub fn frame_duration(&self) -> Duration {
		Duration::from_secs_f64((self.frame_rate as f64).recip())
	}
}


#[test]
fn default_config_is_valid() {
	assert!(Config::default().validate().is_ok());
}

#[test]
fn invalid_config_is_rejected() {
	let config = Config { ray_count: 0, ..Default::default() };
	assert!(config.validate().is_err());
	let config = Config { fov: PI, ..Default::default() };
	assert!(config.validate().is_err());
	let config = Config { ray_step: -1.0, ..Default::default() };
	assert!(config.validate().is_err());
	let config = Config { grid_width: 2, ..Default::default() };
	assert!(config.validate().is_err());
}

#[test]
fn ray_angles_cover_fov() {
	let config = Config::default();
	assert!((config.ray_angle(1.0, 0) - (1.0 - config.half_fov())).abs() < 1e-6);
	let last = config.ray_angle(1.0, config.ray_count - 1);
	assert!(last < 1.0 + config.half_fov());
	assert!((config.column_width() - 800.0 / 240.0).abs() < 1e-6);
}
