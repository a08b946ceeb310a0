use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cube_chase::game::input::InputFrame;
use cube_chase::game::tick::frame;
use cube_chase::{GameConfig, GameState, HeadlessScene};

fn bench_frame(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut scene = HeadlessScene::new();
    let mut state = GameState::new(&config, 12345, &mut scene);
    let input = InputFrame::with_movement(1, -1);
    let interval = Duration::from_micros(16_667);
    let mut elapsed = Duration::ZERO;

    c.bench_function("frame_20_pickups", |b| {
        b.iter(|| {
            elapsed += interval;
            black_box(frame(&mut state, black_box(&input), elapsed, &config, &mut scene))
        })
    });
}

fn bench_state_hash(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut scene = HeadlessScene::new();
    let state = GameState::new(&config, 12345, &mut scene);

    c.bench_function("state_hash", |b| b.iter(|| black_box(state.compute_hash())));
}

criterion_group!(benches, bench_frame, bench_state_hash);
criterion_main!(benches);
