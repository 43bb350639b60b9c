use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilecaster::{
	asset::{Texture, TextureRegistry},
	config::Config,
	firstperson::Renderer,
	game::GameWorld,
	raycasting::multiple_raycast,
	rendering::software::Framebuffer
};

fn raycast_benchmark_fn(c: &mut Criterion) {
	let config = Config::default();
	let mut textures = TextureRegistry::new();
	let brick = textures.insert(Texture::checker(64, 8, [150, 150, 150, 255], [100, 100, 100, 255]));
	for material in 1..=3 {
		textures.bind_material(material, brick).unwrap();
	}
	let pot = textures.insert(Texture::checker(32, 4, [40, 150, 50, 255], [0, 0, 0, 0]));
	let game_world = GameWorld::test_gameworld(&config, pot);

	let mut group = c.benchmark_group("RaycastOperations");

	group.bench_function("multiple_raycast_240_rays", |b| {
		b.iter(|| multiple_raycast(
			black_box(game_world.world()),
			black_box(game_world.get_player_position()),
			black_box(game_world.get_player_angle()),
			&config
		))
	});

	group.bench_function("first_person_frame_commands", |b| {
		let mut renderer = Renderer::new(config.clone());
		b.iter(|| renderer.render(black_box(&game_world), &textures))
	});

	group.bench_function("first_person_frame_rasterized", |b| {
		let mut renderer = Renderer::new(config.clone());
		let mut framebuffer = Framebuffer::new(config.screen_width, config.screen_height);
		b.iter(|| {
			let commands = renderer.render(black_box(&game_world), &textures);
			framebuffer.execute(&commands, &textures);
		})
	});
	group.finish();
}

criterion_group!(benches, raycast_benchmark_fn);
criterion_main!(benches);
