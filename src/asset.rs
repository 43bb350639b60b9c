use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context};

/// Opaque handle into a [`TextureRegistry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

pub struct Texture {
	image: image::RgbaImage
}

impl Texture {
	pub fn from_image(image: image::RgbaImage) -> Self {
		Self { image }
	}

	pub fn width(&self) -> u32 { self.image.width() }
	pub fn height(&self) -> u32 { self.image.height() }

	pub fn size(&self) -> glam::UVec2 {
		glam::uvec2(self.width(), self.height())
	}

	/// Clamped RGBA texel fetch. An empty image reads as fully transparent.
	pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
		if self.width() == 0 || self.height() == 0 {
			return [0; 4];
		}
		let x = x.min(self.width().saturating_sub(1));
		let y = y.min(self.height().saturating_sub(1));
		self.image.get_pixel(x, y).0
	}

	pub fn checker(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
		let cell = (size / cells.max(1)).max(1);
		let image = image::RgbaImage::from_fn(size, size, |x, y|
			if ((x / cell) + (y / cell)) % 2 == 0 { image::Rgba(a) } else { image::Rgba(b) }
		);
		Self { image }
	}
}

/// Owns every texture and maps wall material ids (1..) to them.
#[derive(Default)]
pub struct TextureRegistry {
	textures: Vec<Texture>,
	materials: HashMap<u32, TextureId>
}

impl TextureRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, texture: Texture) -> TextureId {
		self.textures.push(texture);
		TextureId(self.textures.len() as u32 - 1)
	}

	pub fn load(&mut self, path: impl AsRef<Path>) -> anyhow::Result<TextureId> {
		let path = path.as_ref();
		let image = image::open(path)
			.with_context(|| format!("failed to load texture {}", path.display()))?
			.to_rgba8();
		log::info!("loaded texture {} ({}x{})", path.display(), image.width(), image.height());
		Ok(self.insert(Texture::from_image(image)))
	}

	/// Loads `path`, or registers `fallback` when the file is missing or unreadable.
	pub fn load_or(&mut self, path: impl AsRef<Path>, fallback: Texture) -> TextureId {
		match self.load(path.as_ref()) {
			Ok(id) => id,
			Err(err) => {
				log::warn!("{err:#}, using fallback texture");
				self.insert(fallback)
			}
		}
	}

	pub fn bind_material(&mut self, material: u32, texture: TextureId) -> anyhow::Result<()> {
		if material == 0 {
			bail!("material 0 is empty space and cannot carry a texture");
		}
		if self.get(texture).is_none() {
			bail!("texture {texture:?} is not registered");
		}
		self.materials.insert(material, texture);
		Ok(())
	}

	pub fn material_texture(&self, material: u32) -> Option<TextureId> {
		self.materials.get(&material).copied()
	}

	pub fn get(&self, id: TextureId) -> Option<&Texture> {
		self.textures.get(id.0 as usize)
	}

	pub fn size(&self, id: TextureId) -> Option<glam::UVec2> {
		self.get(id).map(Texture::size)
	}
}


#[test]
fn material_binding() {
	let mut registry = TextureRegistry::new();
	let brick = registry.insert(Texture::checker(64, 8, [200, 200, 200, 255], [90, 90, 90, 255]));
	assert!(registry.bind_material(0, brick).is_err());
	assert!(registry.bind_material(2, TextureId(7)).is_err());
	registry.bind_material(2, brick).unwrap();
	assert_eq!(registry.material_texture(2), Some(brick));
	assert_eq!(registry.material_texture(1), None);
	assert_eq!(registry.size(brick), Some(glam::uvec2(64, 64)));
}

#[test]
fn missing_file_falls_back() {
	let mut registry = TextureRegistry::new();
	assert!(registry.load("does/not/exist.png").is_err());
	let id = registry.load_or("does/not/exist.png", Texture::checker(16, 2, [255; 4], [0, 0, 0, 255]));
	assert_eq!(registry.size(id), Some(glam::uvec2(16, 16)));
}

#[test]
fn checker_texels() {
	let texture = Texture::checker(8, 2, [255, 0, 0, 255], [0, 0, 255, 255]);
	assert_eq!(texture.texel(0, 0), [255, 0, 0, 255]);
	assert_eq!(texture.texel(4, 0), [0, 0, 255, 255]);
	assert_eq!(texture.texel(100, 100), [255, 0, 0, 255]);
	assert_eq!(Texture::checker(0, 1, [255; 4], [255; 4]).texel(0, 0), [0; 4]);
}
