use crate::{
	asset::TextureId,
	config::Config,
	geometry::{clamp01, normalize_angle, Rect},
	rendering::{Color, DrawCommand}
};

use super::depth::DepthBuffer;

/// Screen placement of a billboard. Columns span `[left, right)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProjection {
	pub relative_angle: f32,
	pub distance: f32,
	pub corrected_distance: f32,
	pub size: f32,
	pub center_x: f32,
	pub left: f32,
	pub right: f32
}

/// `None` when the object is outside the field of view.
pub fn project_sprite(
	eye: glam::Vec2, heading: f32, position: glam::Vec2, scale: f32, config: &Config
) -> Option<SpriteProjection> {
	let delta = position - eye;
	let relative_angle = normalize_angle(delta.y.atan2(delta.x) - heading);
	if relative_angle.abs() >= config.half_fov() {
		return None;
	}

	let distance = delta.length();
	let corrected_distance = distance * relative_angle.cos();

	let screen_width = config.screen_width as f32;
	let size = (config.screen_height as f32 * scale) / corrected_distance.max(config.near_clip);
	let center_x = (relative_angle / config.half_fov()) * (screen_width / 2.0) + screen_width / 2.0;

	Some(SpriteProjection {
		relative_angle, distance, corrected_distance, size, center_x,
		left: center_x - size / 2.0,
		right: center_x + size / 2.0
	})
}

/// Depth tested vertical slices of a projected billboard, one per wall column step.
pub fn sprite_slices(
	projection: &SpriteProjection, texture: TextureId, texture_size: glam::UVec2,
	depth_buffer: &DepthBuffer, config: &Config
) -> Vec<DrawCommand> {
	let column_width = config.column_width();
	let screen_height = config.screen_height as f32;
	let texture_width = texture_size.x as f32;
	let SpriteProjection { size, left, right, corrected_distance, .. } = *projection;

	// skip whole steps that land left of the screen, close sprites can be enormous
	let skipped = (-left / column_width).floor().max(0.0);
	let mut x = left + skipped * column_width;
	let end = right.min(config.screen_width as f32);

	let mut slices = Vec::new();
	while x < end {
		// toward zero, a slice starting less than a column left of the screen belongs to column 0
		let ray_index = (x / column_width).trunc();
		let column = ray_index as usize;
		if ray_index >= 0.0 && column < depth_buffer.len() && depth_buffer.is_visible(column, corrected_distance) {
			let tex_x = clamp01((x - left) / size);
			let src_x = tex_x * texture_width;
			let src_width = (texture_width * column_width / size).min(texture_width - src_x);
			slices.push(DrawCommand::Texture {
				texture,
				src: Rect::new(src_x, 0.0, src_width, texture_size.y as f32),
				dst: Rect::new(x, screen_height / 2.0 - size / 2.0, column_width + 1.0, size),
				tint: Color::WHITE
			});
		}
		x += column_width;
	}
	slices
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn on_axis_sprite_projects_to_screen_center() {
		let config = Config::default();
		let eye = glam::vec2(160.0, 160.0);
		let heading = 0.8f32;
		let position = eye + glam::Vec2::from_angle(heading) * 0.5;
		let projection = project_sprite(eye, heading, position, 90.0, &config).expect("in view");
		assert!(projection.relative_angle.abs() < 1e-3);
		assert!((projection.center_x - config.screen_width as f32 / 2.0).abs() < 1.0);
		assert!(projection.size.is_finite());
	}

	#[test]
	fn sprite_behind_or_beside_is_culled() {
		let config = Config::default();
		let eye = glam::Vec2::ZERO;
		assert!(project_sprite(eye, 0.0, glam::vec2(-100.0, 0.0), 90.0, &config).is_none());
		// exactly on the frustum edge counts as outside
		let edge = glam::Vec2::from_angle(config.half_fov() + 1e-4) * 100.0;
		assert!(project_sprite(eye, 0.0, edge, 90.0, &config).is_none());
		// wraps across the +-PI seam
		let projection = project_sprite(eye, std::f32::consts::PI - 0.1, glam::vec2(-100.0, -5.0), 90.0, &config);
		assert!(projection.is_some());
	}

	#[test]
	fn projected_size_uses_corrected_distance() {
		let config = Config::default();
		let theta = 0.3f32;
		let position = glam::Vec2::from_angle(theta) * 200.0;
		let projection = project_sprite(glam::Vec2::ZERO, 0.0, position, 90.0, &config).unwrap();
		let corrected = 200.0 * theta.cos();
		assert!((projection.corrected_distance - corrected).abs() < 1e-3);
		assert!((projection.size - 600.0 * 90.0 / corrected).abs() < 1e-2);
		let expected_x = theta / config.half_fov() * 400.0 + 400.0;
		assert!((projection.center_x - expected_x).abs() < 1e-2);
	}

	#[test]
	fn slices_are_hidden_behind_nearer_walls() {
		let config = Config::default();
		let projection = project_sprite(glam::Vec2::ZERO, 0.0, glam::vec2(300.0, 0.0), 90.0, &config).unwrap();
		let mut depth_buffer = DepthBuffer::new(config.ray_count);
		let visible = sprite_slices(&projection, TextureId::default(), glam::uvec2(32, 32), &depth_buffer, &config);
		assert!(!visible.is_empty());

		for column in 0..config.ray_count as usize {
			depth_buffer.write(column, 100.0);
		}
		let hidden = sprite_slices(&projection, TextureId::default(), glam::uvec2(32, 32), &depth_buffer, &config);
		assert!(hidden.is_empty());
	}

	#[test]
	fn slice_crossing_left_edge_is_drawn() {
		let config = Config::default();
		let column_width = config.column_width();
		let left = -0.5 * column_width;
		let projection = SpriteProjection {
			relative_angle: -0.4, distance: 60.0, corrected_distance: 55.0, size: 100.0,
			center_x: left + 50.0, left, right: left + 100.0
		};
		let depth_buffer = DepthBuffer::new(config.ray_count);
		let slices = sprite_slices(&projection, TextureId::default(), glam::uvec2(32, 32), &depth_buffer, &config);

		let DrawCommand::Texture { src, dst, .. } = slices[0] else { panic!("sprites only emit textures") };
		assert_eq!(dst.x, left);
		assert_eq!(src.x, 0.0);
		// the pixels right at the edge are covered, and the next slice continues without a gap
		assert!(dst.x <= 0.0 && dst.x + dst.width > 0.0);
		let DrawCommand::Texture { dst: next, .. } = slices[1] else { panic!("sprites only emit textures") };
		assert!(next.x <= dst.x + dst.width);

		// but still depth tested against column 0
		let mut depth_buffer = DepthBuffer::new(config.ray_count);
		depth_buffer.write(0, 10.0);
		let slices = sprite_slices(&projection, TextureId::default(), glam::uvec2(32, 32), &depth_buffer, &config);
		assert!(!slices.is_empty());
		assert!(slices.iter().all(|slice| matches!(slice, DrawCommand::Texture { dst, .. } if dst.x >= column_width)));
	}

	#[test]
	fn slices_stay_on_screen_and_inside_texture() {
		let config = Config::default();
		let projection = project_sprite(glam::Vec2::ZERO, 0.0, glam::vec2(5.0, 0.5), 90.0, &config).unwrap();
		let depth_buffer = DepthBuffer::new(config.ray_count);
		let slices = sprite_slices(&projection, TextureId::default(), glam::uvec2(32, 32), &depth_buffer, &config);
		assert!(slices.len() <= config.ray_count as usize + 1);
		for slice in slices {
			let DrawCommand::Texture { src, dst, .. } = slice else { panic!("sprites only emit textures") };
			assert!(src.x >= 0.0 && src.x + src.width <= 32.0 + 1e-3);
			assert!(dst.x > -config.column_width() && dst.x < config.screen_width as f32);
		}
	}
}
