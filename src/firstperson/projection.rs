use crate::{config::Config, geometry::Rect};

/// Removes the fish-eye bulge: distance along the view direction instead of along the ray.
pub fn correct_fisheye(distance: f32, ray_angle: f32, heading: f32) -> f32 {
	distance * (ray_angle - heading).cos()
}

/// Screen rectangle of one wall column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnProjection {
	pub corrected_distance: f32,
	pub height: f32,
	pub rect: Rect
}

pub fn project_column(index: u32, corrected_distance: f32, config: &Config) -> ColumnProjection {
	let screen_width = config.screen_width as f32;
	let screen_height = config.screen_height as f32;

	let height = (screen_height * config.wall_scale) / corrected_distance.max(config.near_clip);
	let column_width = screen_width / config.ray_count as f32;

	ColumnProjection {
		corrected_distance,
		height,
		rect: Rect::new(
			index as f32 * column_width,
			screen_height / 2.0 - height / 2.0,
			// +1 hides seams between neighbouring columns
			column_width + 1.0,
			height
		)
	}
}


#[test]
fn fisheye_correction() {
	assert_eq!(correct_fisheye(120.0, 0.7, 0.7), 120.0);
	let theta = 0.3f32;
	assert!((correct_fisheye(100.0, 1.0 + theta, 1.0) - 100.0 * theta.cos()).abs() < 1e-4);
	assert!((correct_fisheye(100.0, 1.0 - theta, 1.0) - 100.0 * theta.cos()).abs() < 1e-4);
}

#[test]
fn column_is_centered_on_horizon() {
	let config = Config::default();
	let column = project_column(3, 100.0, &config);
	assert!((column.height - 300.0).abs() < 1e-4);
	assert!((column.rect.y - 150.0).abs() < 1e-4);
	assert!((column.rect.center().y - 300.0).abs() < 1e-4);
	assert!((column.rect.x - 3.0 * config.column_width()).abs() < 1e-4);
	assert!((column.rect.width - (config.column_width() + 1.0)).abs() < 1e-6);
}

#[test]
fn near_plane_guard_keeps_height_finite() {
	let config = Config::default();
	for distance in [0.0, -0.0, 1e-12, -5.0] {
		let column = project_column(0, distance, &config);
		assert!(column.height.is_finite());
		assert!(column.rect.y.is_finite());
		assert_eq!(column.height, config.screen_height as f32 * config.wall_scale / config.near_clip);
	}
}
