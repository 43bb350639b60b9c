use anyhow::{bail, Context};
use tilecaster::{
	asset::{Texture, TextureRegistry},
	config::Config,
	game::{GameWorld, WorldModel},
	Tilecaster
};

const WALL_TEXTURES: [(&str, [u8; 4], [u8; 4]); 3] = [
	("assets/textures/brick/brick_gray.png", [150, 150, 150, 255], [100, 100, 100, 255]),
	("assets/textures/brick/brick_red.png", [170, 70, 60, 255], [120, 50, 40, 255]),
	("assets/textures/brick/brick_blue.png", [70, 80, 170, 255], [40, 50, 120, 255]),
];
const POT_TEXTURE: &str = "assets/textures/object/pot_tree.png";

struct Args {
	snapshot: Option<String>,
	rect_world: bool,
	shading: bool
}

fn parse_args() -> anyhow::Result<Args> {
	let mut parsed = Args { snapshot: None, rect_world: false, shading: false };
	let mut args = std::env::args().skip(1);
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"--snapshot" => parsed.snapshot = Some(args.next().context("--snapshot needs an output path")?),
			"--rects" => parsed.rect_world = true,
			"--shading" => parsed.shading = true,
			other => bail!("unknown argument {other:?} (expected --snapshot <png>, --rects, --shading)")
		}
	}
	Ok(parsed)
}

// green blob on a transparent background, stands in for the pot when the png is missing
fn fallback_pot() -> Texture {
	let image = image::RgbaImage::from_fn(32, 32, |x, y| {
		let offset = glam::vec2(x as f32 - 15.5, y as f32 - 15.5);
		if offset.length() < 14.0 { image::Rgba([40, 150, 50, 255]) } else { image::Rgba([0, 0, 0, 0]) }
	});
	Texture::from_image(image)
}

fn load_textures() -> anyhow::Result<(TextureRegistry, tilecaster::asset::TextureId)> {
	let mut textures = TextureRegistry::new();
	for (material, (path, a, b)) in (1..).zip(WALL_TEXTURES) {
		let texture = textures.load_or(path, Texture::checker(64, 8, a, b));
		textures.bind_material(material, texture)?;
	}
	let pot = textures.load_or(POT_TEXTURE, fallback_pot());
	Ok((textures, pot))
}

fn start<W: WorldModel + 'static>(mut app: Tilecaster<W>, snapshot: Option<String>) -> anyhow::Result<()> {
	match snapshot {
		Some(path) => {
			app.render().to_image().save(&path).with_context(|| format!("failed to write snapshot {path}"))?;
			log::info!("snapshot written to {path}");
			Ok(())
		},
		None => app.run()
	}
}

fn main() -> anyhow::Result<()> {
	env_logger::init();

	let args = parse_args()?;
	let config = Config { shading: args.shading, ..Default::default() };
	let (textures, pot) = load_textures()?;

	if args.rect_world {
		let game_world = GameWorld::test_rect_world(&config);
		start(Tilecaster::new(config, game_world, textures)?, args.snapshot)
	}
	else {
		let game_world = GameWorld::test_gameworld(&config, pot);
		start(Tilecaster::new(config, game_world, textures)?, args.snapshot)
	}
}
