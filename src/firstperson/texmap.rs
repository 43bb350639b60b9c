use crate::{geometry::{clamp01, Rect}, raycasting::Face};

/// Texel column for `hit_x`, mirrored so faces never read backwards.
pub fn texture_column(hit_x: f32, texture_width: u32, face: Face, direction: glam::Vec2) -> u32 {
	if texture_width == 0 {
		return 0;
	}
	let column = ((clamp01(hit_x) * texture_width as f32).floor() as u32).min(texture_width - 1);
	let mirrored = match face {
		Face::Horizontal => direction.y < 0.0,
		Face::Vertical => direction.x > 0.0
	};
	if mirrored { texture_width - column - 1 } else { column }
}

/// One texel wide, full height source strip.
pub fn source_strip(column: u32, texture_size: glam::UVec2) -> Rect {
	Rect::new(column as f32, 0.0, 1.0, texture_size.y as f32)
}


#[test]
fn column_stays_in_range_for_boundary_offsets() {
	for width in [1, 2, 63, 64, 256] {
		for hit_x in [0.0, 0.25, 0.5, 0.999, 1.0] {
			for face in [Face::Vertical, Face::Horizontal] {
				for direction in [glam::vec2(1.0, 1.0), glam::vec2(-1.0, -1.0)] {
					let column = texture_column(hit_x, width, face, direction);
					assert!(column < width, "{hit_x} {width} {face:?} gave {column}");
				}
			}
		}
	}
}

#[test]
fn far_side_is_mirrored() {
	// looking east at a west-facing side reads the texture backwards unless flipped
	assert_eq!(texture_column(0.0, 64, Face::Vertical, glam::vec2(1.0, 0.0)), 63);
	assert_eq!(texture_column(0.0, 64, Face::Vertical, glam::vec2(-1.0, 0.0)), 0);
	assert_eq!(texture_column(0.25, 64, Face::Horizontal, glam::vec2(0.0, -1.0)), 47);
	assert_eq!(texture_column(0.25, 64, Face::Horizontal, glam::vec2(0.0, 1.0)), 16);
}

#[test]
fn strip_is_one_texel_wide() {
	assert_eq!(source_strip(5, glam::uvec2(64, 32)), Rect::new(5.0, 0.0, 1.0, 32.0));
}
