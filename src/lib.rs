use std::{num::NonZeroU32, sync::Arc, time::Instant};

use anyhow::{anyhow, Context};
use winit::{
	dpi::PhysicalSize,
	event::{Event, KeyEvent, StartCause, WindowEvent},
	event_loop::{ControlFlow, EventLoop},
	keyboard::PhysicalKey,
	window::{Window, WindowBuilder},
};

/*

lib.rs: the outside face of the crate.

 - open a window, pump input, keep the frame rate
 - step the game and draw it with the software rasterizer

Game: world model, player, collision
Raycasting: fixed step ray march
Firstperson: walls, depth buffer, billboards -> draw commands
Rendering: draw commands -> pixels, minimap overlay

 */

pub mod asset;
pub mod config;
pub mod firstperson;
pub mod game;
pub mod geometry;
pub mod input;
pub mod raycasting;
pub mod rendering;

use asset::TextureRegistry;
use config::Config;
use game::{GameWorld, WorldModel};
use input::{Action, InputState};
use rendering::{minimap::MiniMap, software::Framebuffer};

pub struct Tilecaster<W: WorldModel> {
	game_world: GameWorld<W>,
	textures: TextureRegistry,
	renderer: firstperson::Renderer,
	minimap: MiniMap,
	framebuffer: Framebuffer,
	input_state: InputState,
	draw_minimap: bool
}

impl<W: WorldModel> Tilecaster<W> {
	pub fn new(config: Config, game_world: GameWorld<W>, textures: TextureRegistry) -> anyhow::Result<Self> {
		config.validate().context("invalid configuration")?;
		log::info!(
			"{}x{} screen, {} rays over {:.1} degrees, step {}",
			config.screen_width, config.screen_height, config.ray_count, config.fov.to_degrees(), config.ray_step
		);
		Ok(Self {
			minimap: MiniMap::new(&config),
			framebuffer: Framebuffer::new(config.screen_width, config.screen_height),
			renderer: firstperson::Renderer::new(config),
			game_world,
			textures,
			input_state: InputState::default(),
			draw_minimap: false
		})
	}

	pub fn config(&self) -> &Config {
		self.renderer.config()
	}
	pub fn game_world(&self) -> &GameWorld<W> {
		&self.game_world
	}
	pub fn input_state_mut(&mut self) -> &mut InputState {
		&mut self.input_state
	}

	/// One fixed simulation step driven by the current input.
	pub fn process(&mut self) {
		let controls = self.input_state.controls();
		self.game_world.control(&controls, self.renderer.config());

		if self.input_state.is_action_just_pressed(Action::ToggleMinimap) {
			self.draw_minimap = !self.draw_minimap;
			log::debug!("minimap: {}", self.draw_minimap);
		}
		if self.input_state.is_action_just_pressed(Action::ToggleShading) {
			let shading = self.renderer.toggle_shading();
			log::debug!("shade distance: {shading}");
		}
		self.input_state.end_frame();
	}

	/// Walls, then sprites, then the optional overlay, rasterized into the internal framebuffer.
	pub fn render(&mut self) -> &Framebuffer {
		let mut commands = self.renderer.render(&self.game_world, &self.textures);
		if self.draw_minimap {
			commands.extend(self.minimap.draw(&self.game_world, self.renderer.casts(), self.renderer.config()));
		}
		self.framebuffer.execute(&commands, &self.textures);
		&self.framebuffer
	}

	fn title(&self) -> String {
		format!("tilecaster | shade distance: {}", self.renderer.config().shading)
	}

	pub fn run(mut self) -> anyhow::Result<()> where W: 'static {
		let event_loop = EventLoop::new().context("failed to create event loop")?;
		let window = Arc::new(WindowBuilder::new()
			.with_title(self.title())
			.with_inner_size(PhysicalSize::new(self.config().screen_width, self.config().screen_height))
			.build(&event_loop)
			.context("failed to create window")?);

		let context = softbuffer::Context::new(window.clone())
			.map_err(|err| anyhow!("failed to create softbuffer context: {err}"))?;
		let mut surface = softbuffer::Surface::new(&context, window.clone())
			.map_err(|err| anyhow!("failed to create softbuffer surface: {err}"))?;

		let process_tickrate = self.config().frame_duration();
		let mut last_process_tick = Instant::now();

		event_loop.run(
			move |event, elwt|
			match event
			{
				Event::WindowEvent { event, window_id } if window_id == window.id() =>
				match event
				{
					WindowEvent::KeyboardInput { event: KeyEvent {
						physical_key: PhysicalKey::Code(keycode),
						state, repeat: false, ..
					}, .. } => self.input_state.set_key_state(keycode, state.is_pressed()),
					WindowEvent::RedrawRequested => {
						self.render();
						if let Err(err) = present(&mut surface, &window, &self.framebuffer) {
							log::error!("{err:#}");
						}
					},
					WindowEvent::CloseRequested => elwt.exit(),
					_ => ()
				},
				Event::NewEvents(StartCause::Poll | StartCause::ResumeTimeReached { .. } | StartCause::WaitCancelled { .. }) =>
				{
					let last_process_time = Instant::now().duration_since(last_process_tick);
					if last_process_time >= process_tickrate {
						last_process_tick = Instant::now();
						let shading = self.renderer.config().shading;
						self.process();
						if shading != self.renderer.config().shading {
							window.set_title(&self.title());
						}
						window.request_redraw();
					}
				},
				Event::AboutToWait =>
				{
					let last_process_time = Instant::now().duration_since(last_process_tick);
					if last_process_time >= process_tickrate {
						elwt.set_control_flow(ControlFlow::Poll);
					}
					else {
						elwt.set_control_flow(ControlFlow::WaitUntil(Instant::now() + process_tickrate - last_process_time));
					}
				},
				_ => ()
			}
		).context("event loop terminated with an error")
	}
}

fn present(
	surface: &mut softbuffer::Surface<Arc<Window>, Arc<Window>>, window: &Window, framebuffer: &Framebuffer
) -> anyhow::Result<()> {
	let size = window.inner_size();
	let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
		return Ok(());
	};
	surface.resize(width, height).map_err(|err| anyhow!("failed to resize surface: {err}"))?;
	let mut buffer = surface.buffer_mut().map_err(|err| anyhow!("failed to map surface buffer: {err}"))?;
	framebuffer.present_into(&mut buffer, size.width, size.height);
	buffer.present().map_err(|err| anyhow!("failed to present frame: {err}"))
}
