use crate::{
	asset::TextureRegistry,
	config::Config,
	raycasting::{Hit, RayCast},
	rendering::{Color, DrawCommand}
};

use super::{projection, shading, texmap};

/// Draw command for the wall seen by column `index`, plus its corrected distance.
pub fn wall_column(
	index: u32, cast: &RayCast, hit: &Hit, heading: f32,
	textures: &TextureRegistry, config: &Config
) -> (f32, DrawCommand) {
	let corrected_distance = projection::correct_fisheye(cast.distance, cast.angle, heading);
	let column = projection::project_column(index, corrected_distance, config);
	let tint = shading::shade_tint(corrected_distance, config.max_shade_distance, config.shading);

	let texture = config.texturing.then(|| textures.material_texture(hit.material))
		.flatten()
		.and_then(|id| textures.size(id).map(|size| (id, size)));

	let command = match texture {
		Some((texture, size)) => {
			let texel_column = texmap::texture_column(hit.hit_x, size.x, hit.face, cast.direction);
			DrawCommand::Texture {
				texture,
				src: texmap::source_strip(texel_column, size),
				dst: column.rect,
				tint
			}
		},
		None => DrawCommand::FillRect {
			rect: column.rect,
			color: Color::material_palette(hit.material).modulate(tint)
		}
	};

	(corrected_distance, command)
}
