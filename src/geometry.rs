use std::f32::consts::{PI, TAU};

// Axis aligned rectangle. Screen and world space both grow y downward.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rect {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32
}

impl Rect {
	pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self { x, y, width, height }
	}

	/// Square of half extent `half` centered on `center`.
	pub fn square_around(center: glam::Vec2, half: f32) -> Self {
		Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
	}

	pub fn left(&self) -> f32 { self.x }
	pub fn right(&self) -> f32 { self.x + self.width }
	pub fn top(&self) -> f32 { self.y }
	pub fn bottom(&self) -> f32 { self.y + self.height }

	pub fn position(&self) -> glam::Vec2 {
		glam::vec2(self.x, self.y)
	}
	pub fn size(&self) -> glam::Vec2 {
		glam::vec2(self.width, self.height)
	}
	pub fn center(&self) -> glam::Vec2 {
		self.position() + self.size() * 0.5
	}

	// Half open on the far edges so that neighbouring tiles never both contain a point.
	pub fn contains(&self, point: glam::Vec2) -> bool {
		point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
	}

	/// Strict overlap. Rectangles that only share an edge do not collide.
	pub fn overlaps(&self, other: &Rect) -> bool {
		self.left() < other.right() && other.left() < self.right()
			&& self.top() < other.bottom() && other.top() < self.bottom()
	}

	/// Distance from `point` to the nearest left/right edge and to the nearest top/bottom edge.
	pub fn edge_distances(&self, point: glam::Vec2) -> glam::Vec2 {
		glam::vec2(
			(point.x - self.left()).abs().min((point.x - self.right()).abs()),
			(point.y - self.top()).abs().min((point.y - self.bottom()).abs())
		)
	}
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
	let wrapped = (angle + PI).rem_euclid(TAU) - PI;
	if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Wraps a heading into `[0, TAU)`.
pub fn wrap_heading(angle: f32) -> f32 {
	let wrapped = angle.rem_euclid(TAU);
	if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn clamp01(value: f32) -> f32 {
	value.clamp(0.0, 1.0)
}


#[test]
fn normalize_angle_range() {
	assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-5);
	assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
	assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
	assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
	for i in -40..40 {
		let a = normalize_angle(i as f32 * 0.37);
		assert!(a > -PI && a <= PI);
	}
}

#[test]
fn rect_contains_is_half_open() {
	let rect = Rect::new(64.0, 64.0, 64.0, 64.0);
	assert!(rect.contains(glam::vec2(64.0, 64.0)));
	assert!(rect.contains(glam::vec2(127.9, 100.0)));
	assert!(!rect.contains(glam::vec2(128.0, 100.0)));
	assert!(!rect.contains(glam::vec2(100.0, 63.9)));
}

#[test]
fn rect_overlap_excludes_touching_edges() {
	let a = Rect::new(0.0, 0.0, 10.0, 10.0);
	assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
	assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
	assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
}

#[test]
fn edge_distances_pick_nearest_edges() {
	let rect = Rect::new(0.0, 0.0, 64.0, 64.0);
	let d = rect.edge_distances(glam::vec2(63.0, 20.0));
	assert_eq!(d, glam::vec2(1.0, 20.0));
}
