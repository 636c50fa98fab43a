use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_arcade::core::{Board, Minefield, MinefieldConfig, TetrisConfig, TetrisGame};
use grid_arcade::term::{FrameBuffer, TetrisView, Viewport};
use grid_arcade::types::{Color, TetrisAction};

fn bench_flood_fill(c: &mut Criterion) {
    // One mine in a corner: the first click cascades over the whole board.
    c.bench_function("flood_fill_200x200", |b| {
        b.iter(|| {
            let mut field = Minefield::with_mine_layout(200, 200, &[(199, 199)]).unwrap();
            field.left_click(black_box(0), black_box(0));
            field.revealed_count()
        })
    });
}

fn bench_first_click_expert(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("first_click_expert", |b| {
        b.iter(|| {
            seed += 1;
            let mut field = Minefield::new(MinefieldConfig::expert(), seed).unwrap();
            field.left_click(black_box(8), black_box(15))
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for v in 16..20 {
                board.fill_visible_row(v, Color::Cyan, &[]);
            }
            board.clear_lines()
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = TetrisGame::new(TetrisConfig::default(), 12345).unwrap();
    game.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if game.is_game_over() {
                game.restart();
            }
            game.tick()
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = TetrisGame::new(TetrisConfig::default(), 12345).unwrap();
    game.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if game.is_game_over() {
                game.restart();
            }
            game.apply_action(black_box(TetrisAction::HardDrop))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = TetrisGame::new(TetrisConfig::default(), 7).unwrap();
    game.start();
    let snap = game.snapshot();
    let view = TetrisView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_tetris_80x24", |b| {
        b.iter(|| {
            view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_flood_fill,
    bench_first_click_expert,
    bench_line_clear,
    bench_tick,
    bench_hard_drop,
    bench_render
);
criterion_main!(benches);
