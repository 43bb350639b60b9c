// Output side of the pipeline. The first person and minimap passes only emit
// draw commands, a rasterizer turns them into pixels.

use crate::{asset::TextureId, geometry::Rect};

pub mod minimap;
pub mod software;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32
}

impl Color {
	pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
	pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
	pub const GRAY: Color = Color::rgb(0.51, 0.51, 0.51);
	pub const DARK_GRAY: Color = Color::rgb(0.314, 0.314, 0.314);
	pub const BLUE: Color = Color::rgb(0.0, 0.475, 0.945);
	pub const GREEN: Color = Color::rgb(0.0, 0.894, 0.188);

	pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r: r as f32 / 255.0, g: g as f32 / 255.0, b: b as f32 / 255.0, a: a as f32 / 255.0 }
	}

	pub fn to_rgba8(self) -> [u8; 4] {
		let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
		[c(self.r), c(self.g), c(self.b), c(self.a)]
	}

	/// Solid colour for walls whose material has no texture.
	pub fn material_palette(material: u32) -> Self {
		const PALETTE: [[u8; 3]; 4] = [[200, 200, 200], [110, 110, 110], [40, 60, 140], [150, 60, 40]];
		let [r, g, b] = PALETTE[(material.max(1) as usize - 1) % PALETTE.len()];
		Color::from_rgba8(r, g, b, 255)
	}

	pub fn modulate(self, other: Color) -> Self {
		Self { r: self.r * other.r, g: self.g * other.g, b: self.b * other.b, a: self.a * other.a }
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
	FillRect { rect: Rect, color: Color },
	/// Samples `src` (texel space) of `texture` into `dst` (screen space), multiplied by `tint`.
	Texture { texture: TextureId, src: Rect, dst: Rect, tint: Color },
	Line { from: glam::Vec2, to: glam::Vec2, color: Color }
}


#[test]
fn color_byte_conversion() {
	assert_eq!(Color::from_rgba8(12, 34, 56, 78).to_rgba8(), [12, 34, 56, 78]);
	assert_eq!(Color::rgb(0.5, 0.5, 0.5).modulate(Color::rgb(0.5, 1.0, 0.0)), Color::rgb(0.25, 0.5, 0.0));
}
