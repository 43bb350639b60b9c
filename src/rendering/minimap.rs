use crate::{
	config::Config,
	game::{GameWorld, WorldModel},
	geometry::Rect,
	raycasting::RayCast
};

use super::{Color, DrawCommand};

const SHADE_LAYER: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 100.0 / 255.0 };
const PLAYER_RADIUS: f32 = 6.0;

/// Top down overlay at a fixed scale, anchored at the top left corner.
pub struct MiniMap {
	scale: f32,
	origin: glam::Vec2
}

impl MiniMap {
	pub fn new(config: &Config) -> Self {
		Self { scale: config.minimap_scale, origin: glam::vec2(16.0, 48.0) }
	}

	fn to_screen(&self, point: glam::Vec2) -> glam::Vec2 {
		self.origin + point * self.scale
	}

	fn rect_to_screen(&self, rect: &Rect) -> Rect {
		let position = self.to_screen(rect.position());
		Rect::new(position.x, position.y, rect.width * self.scale, rect.height * self.scale)
	}

	pub fn draw<W: WorldModel>(&self, game_world: &GameWorld<W>, casts: &[RayCast], config: &Config) -> Vec<DrawCommand> {
		let solids = game_world.world().solids();
		let mut commands = Vec::with_capacity(solids.len() + casts.len() + game_world.objects().len() + 2);

		commands.push(DrawCommand::FillRect {
			rect: Rect::new(0.0, 0.0, config.screen_width as f32, config.screen_height as f32),
			color: SHADE_LAYER
		});

		commands.extend(solids.iter().map(|solid| DrawCommand::FillRect {
			rect: self.rect_to_screen(&solid.bounds),
			color: Color::GRAY
		}));

		// only rays that found a wall are drawn, like the first person view only draws those columns
		let eye = self.to_screen(game_world.get_player_position());
		commands.extend(casts.iter().filter(|cast| cast.is_hit()).map(|cast| DrawCommand::Line {
			from: eye,
			to: self.to_screen(cast.position),
			color: Color::GREEN
		}));

		commands.extend(game_world.objects().iter().map(|object| DrawCommand::FillRect {
			rect: Rect::square_around(self.to_screen(object.position), object.radius * self.scale),
			color: Color::WHITE
		}));

		commands.push(DrawCommand::FillRect {
			rect: Rect::square_around(eye, PLAYER_RADIUS * self.scale),
			color: Color::BLUE
		});

		commands
	}
}
