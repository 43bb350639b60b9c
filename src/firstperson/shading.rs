use crate::rendering::Color;

// Far walls stay dimly visible instead of going black.
const MIN_SHADE: f32 = 0.2;

pub fn distance_shade(corrected_distance: f32, max_distance: f32) -> f32 {
	(1.0 - corrected_distance / max_distance).clamp(MIN_SHADE, 1.0)
}

/// Per draw tint. Full bright when shading is off.
pub fn shade_tint(corrected_distance: f32, max_distance: f32, enabled: bool) -> Color {
	if !enabled {
		return Color::WHITE;
	}
	let shade = distance_shade(corrected_distance, max_distance);
	Color::rgb(shade, shade, shade)
}


#[test]
fn shade_is_linear_then_clamped() {
	assert_eq!(distance_shade(0.0, 800.0), 1.0);
	assert!((distance_shade(400.0, 800.0) - 0.5).abs() < 1e-6);
	assert_eq!(distance_shade(700.0, 800.0), 0.2);
	assert_eq!(distance_shade(5000.0, 800.0), 0.2);
	assert_eq!(distance_shade(-10.0, 800.0), 1.0);
}

#[test]
fn disabled_shading_is_neutral() {
	assert_eq!(shade_tint(700.0, 800.0, false), Color::WHITE);
	let tint = shade_tint(400.0, 800.0, true);
	assert!((tint.r - 0.5).abs() < 1e-6 && tint.r == tint.g && tint.g == tint.b);
	assert_eq!(tint.a, 1.0);
}
