use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_shooter::core::{Board, Controller, NullNotifier, ShooterConfig, SimpleRng};
use matrix_shooter::engine::{FrameForwarder, MemorySink};
use matrix_shooter::types::{Button, GRID_COLUMNS, GRID_ROWS, PIXEL_SCALE};

fn playing_controller() -> Controller {
    let config = ShooterConfig {
        seed: Some(12345),
        ..Default::default()
    };
    let mut c = Controller::new(config, NullNotifier).unwrap();
    c.on_button(Button::Fire);
    c
}

fn bench_tick(c: &mut Criterion) {
    let mut game = playing_controller();

    c.bench_function("controller_tick", |b| {
        b.iter(|| {
            // Restart when a round is lost so every sample measures play.
            if game.tick().phase != matrix_shooter::core::Phase::Playing {
                game.on_button(Button::Fire);
            }
        })
    });
}

fn bench_shift_down(c: &mut Criterion) {
    c.bench_function("shift_down_full_board", |b| {
        b.iter(|| {
            let mut board = Board::new(GRID_COLUMNS, GRID_ROWS, PIXEL_SCALE, SimpleRng::new(1));
            for row in 0..GRID_ROWS - 2 {
                for col in 0..GRID_COLUMNS {
                    board.place_ship(col, row, 3);
                }
            }
            black_box(board.shift_down())
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut board = Board::new(GRID_COLUMNS, GRID_ROWS, PIXEL_SCALE, SimpleRng::new(7));

    c.bench_function("add_ship", |b| {
        b.iter(|| {
            let outcome = board.add_ship(black_box(4));
            board.reset();
            outcome
        })
    });
}

fn bench_forward(c: &mut Criterion) {
    let mut game = playing_controller();
    let mut sink = MemorySink::new(8, GRID_ROWS + 1);
    let mut fwd = FrameForwarder::new();

    c.bench_function("forward_dirty_pixels", |b| {
        b.iter(|| {
            game.on_button(Button::Left);
            game.tick();
            fwd.forward(game.display(), None, game.status(), &mut sink)
        })
    });
}

criterion_group!(benches, bench_tick, bench_shift_down, bench_spawn, bench_forward);
criterion_main!(benches);
