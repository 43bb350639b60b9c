use crate::{
	asset::TextureRegistry,
	config::Config,
	game::{GameWorld, WorldModel},
	geometry::Rect,
	raycasting::{self, RayCast},
	rendering::{Color, DrawCommand}
};

pub mod depth;
pub mod projection;
pub mod shading;
pub mod sprite;
pub mod texmap;
mod wall;

pub use depth::DepthBuffer;

const CEILING: Color = Color::DARK_GRAY;
const FLOOR: Color = Color::GRAY;

/// First person view: background, then walls into the depth buffer, then billboards against it.
pub struct Renderer {
	config: Config,
	depth_buffer: DepthBuffer,
	casts: Vec<RayCast>
}

impl Renderer {
	pub fn new(config: Config) -> Self {
		let depth_buffer = DepthBuffer::new(config.ray_count);
		Self { config, depth_buffer, casts: Vec::new() }
	}

	pub fn config(&self) -> &Config { &self.config }

	/// Depth written by the last wall pass.
	pub fn depth_buffer(&self) -> &DepthBuffer { &self.depth_buffer }

	/// Rays of the last wall pass, left to right.
	pub fn casts(&self) -> &[RayCast] { &self.casts }

	pub fn toggle_shading(&mut self) -> bool {
		self.config.shading = !self.config.shading;
		self.config.shading
	}

	pub fn render<W: WorldModel>(&mut self, game_world: &GameWorld<W>, textures: &TextureRegistry) -> Vec<DrawCommand> {
		let mut commands = Vec::with_capacity(self.config.ray_count as usize + 2);
		self.background(&mut commands);
		self.wall_pass(game_world, textures, &mut commands);
		if self.config.sprites {
			self.sprite_pass(game_world, textures, &mut commands);
		}
		log::trace!("first person frame: {} draw commands", commands.len());
		commands
	}

	fn background(&self, commands: &mut Vec<DrawCommand>) {
		let width = self.config.screen_width as f32;
		let half_height = self.config.screen_height as f32 / 2.0;
		commands.push(DrawCommand::FillRect { rect: Rect::new(0.0, 0.0, width, half_height), color: CEILING });
		commands.push(DrawCommand::FillRect { rect: Rect::new(0.0, half_height, width, half_height), color: FLOOR });
	}

	fn wall_pass<W: WorldModel>(&mut self, game_world: &GameWorld<W>, textures: &TextureRegistry, commands: &mut Vec<DrawCommand>) {
		let heading = game_world.get_player_angle();
		self.depth_buffer.reset(self.config.ray_count);
		self.casts = raycasting::multiple_raycast(game_world.world(), game_world.get_player_position(), heading, &self.config);

		for (index, cast) in self.casts.iter().enumerate() {
			// a miss leaves the background showing and the column infinitely deep
			let Some(hit) = cast.hit.as_ref() else { continue; };
			let (corrected_distance, command) = wall::wall_column(index as u32, cast, hit, heading, textures, &self.config);
			self.depth_buffer.write(index, corrected_distance);
			commands.push(command);
		}
	}

	fn sprite_pass<W: WorldModel>(&self, game_world: &GameWorld<W>, textures: &TextureRegistry, commands: &mut Vec<DrawCommand>) {
		let eye = game_world.get_player_position();
		let heading = game_world.get_player_angle();

		// back to front so nearer billboards cover farther ones
		let mut objects: Vec<_> = game_world.objects().iter().collect();
		objects.sort_by(|a, b| b.position.distance_squared(eye).total_cmp(&a.position.distance_squared(eye)));

		for object in objects {
			let Some(size) = textures.size(object.texture) else {
				log::warn!("static object at {:?} has no texture {:?}", object.position, object.texture);
				continue;
			};
			if let Some(projection) = sprite::project_sprite(eye, heading, object.position, object.scale, &self.config) {
				commands.extend(sprite::sprite_slices(&projection, object.texture, size, &self.depth_buffer, &self.config));
			}
		}
	}
}
