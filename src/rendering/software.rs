use crate::{asset::TextureRegistry, geometry::Rect};

use super::{Color, DrawCommand};

/// CPU rasterizer for [`DrawCommand`] lists.
pub struct Framebuffer {
	width: u32,
	height: u32,
	pixels: Vec<[u8; 4]>
}

impl Framebuffer {
	// Texels more transparent than this are cut out of sprites.
	const ALPHA_CUTOFF: u8 = 8;

	pub fn new(width: u32, height: u32) -> Self {
		Self { width, height, pixels: vec![[0, 0, 0, 255]; (width * height) as usize] }
	}

	pub fn width(&self) -> u32 { self.width }
	pub fn height(&self) -> u32 { self.height }

	pub fn clear(&mut self, color: Color) {
		self.pixels.fill(color.to_rgba8());
	}

	pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
		if x >= self.width || y >= self.height {
			return None;
		}
		Some(self.pixels[(y * self.width + x) as usize])
	}

	pub fn execute(&mut self, commands: &[DrawCommand], textures: &TextureRegistry) {
		for command in commands {
			match *command {
				DrawCommand::FillRect { rect, color } => self.fill_rect(&rect, color),
				DrawCommand::Texture { texture, src, dst, tint } => {
					if let Some(texture) = textures.get(texture) {
						self.blit_texture(texture, &src, &dst, tint);
					} else {
						log::warn!("draw command references unknown texture {texture:?}");
					}
				},
				DrawCommand::Line { from, to, color } => self.line(from, to, color)
			}
		}
	}

	// Pixel range covered by `rect`, clipped to the screen. Pixel centers decide coverage.
	fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
		let x0 = (rect.left() - 0.5).ceil().max(0.0);
		let y0 = (rect.top() - 0.5).ceil().max(0.0);
		let x1 = (rect.right() - 0.5).ceil().min(self.width as f32);
		let y1 = (rect.bottom() - 0.5).ceil().min(self.height as f32);
		if !(x0 < x1 && y0 < y1) {
			return None;
		}
		Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
	}

	fn blend(&mut self, x: u32, y: u32, color: [u8; 4]) {
		let idx = (y * self.width + x) as usize;
		let alpha = color[3] as u32;
		if alpha == 255 {
			self.pixels[idx] = color;
			return;
		}
		let dst = &mut self.pixels[idx];
		for c in 0..3 {
			dst[c] = ((color[c] as u32 * alpha + dst[c] as u32 * (255 - alpha)) / 255) as u8;
		}
	}

	fn fill_rect(&mut self, rect: &Rect, color: Color) {
		let Some((x0, y0, x1, y1)) = self.clip(rect) else { return; };
		let rgba = color.to_rgba8();
		for y in y0..y1 {
			for x in x0..x1 {
				self.blend(x, y, rgba);
			}
		}
	}

	fn blit_texture(&mut self, texture: &crate::asset::Texture, src: &Rect, dst: &Rect, tint: Color) {
		if dst.width <= 0.0 || dst.height <= 0.0 || texture.width() == 0 || texture.height() == 0 {
			return;
		}
		let Some((x0, y0, x1, y1)) = self.clip(dst) else { return; };
		for y in y0..y1 {
			let v = (y as f32 + 0.5 - dst.y) / dst.height;
			let ty = (src.y + v * src.height).floor().max(0.0) as u32;
			for x in x0..x1 {
				let u = (x as f32 + 0.5 - dst.x) / dst.width;
				let tx = (src.x + u * src.width).floor().max(0.0) as u32;
				let [r, g, b, a] = texture.texel(tx, ty);
				if a < Self::ALPHA_CUTOFF {
					continue;
				}
				let shaded = Color::from_rgba8(r, g, b, a).modulate(tint);
				self.blend(x, y, shaded.to_rgba8());
			}
		}
	}

	// Bresenham
	fn line(&mut self, from: glam::Vec2, to: glam::Vec2, color: Color) {
		let rgba = color.to_rgba8();
		let (mut x, mut y) = (from.x.floor() as i32, from.y.floor() as i32);
		let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);
		let dx = (x1 - x).abs();
		let dy = -(y1 - y).abs();
		let sx = if x < x1 { 1 } else { -1 };
		let sy = if y < y1 { 1 } else { -1 };
		let mut err = dx + dy;
		loop {
			if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
				self.blend(x as u32, y as u32, rgba);
			}
			if x == x1 && y == y1 {
				break;
			}
			let e2 = 2 * err;
			if e2 >= dy { err += dy; x += sx; }
			if e2 <= dx { err += dx; y += sy; }
		}
	}

	/// Nearest neighbour copy into a `0RGB` surface of any size.
	pub fn present_into(&self, dst: &mut [u32], dst_width: u32, dst_height: u32) {
		if dst_width == 0 || dst_height == 0 {
			return;
		}
		for dy in 0..dst_height {
			let sy = (dy as u64 * self.height as u64 / dst_height as u64) as u32;
			for dx in 0..dst_width {
				let sx = (dx as u64 * self.width as u64 / dst_width as u64) as u32;
				let [r, g, b, _] = self.pixels[(sy * self.width + sx) as usize];
				if let Some(out) = dst.get_mut((dy * dst_width + dx) as usize) {
					*out = (r as u32) << 16 | (g as u32) << 8 | b as u32;
				}
			}
		}
	}

	pub fn to_image(&self) -> image::RgbaImage {
		let raw: Vec<u8> = bytemuck::cast_slice(&self.pixels).to_vec();
		image::RgbaImage::from_raw(self.width, self.height, raw)
			.unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
	}
}
