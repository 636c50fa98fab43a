use grid_arcade::core::{Minefield, TetrisConfig, TetrisGame};
use grid_arcade::term::{
    encode_diff_into, encode_full_into, FrameBuffer, MinefieldHud, MinefieldView, TetrisView,
    Viewport,
};
use grid_arcade::types::{Color, PlayfieldState};

#[test]
fn tetris_view_renders_border_corners() {
    let game = TetrisGame::new(TetrisConfig::default(), 1).unwrap();
    let fb = TetrisView::default().render(&game.snapshot(), Viewport::new(22, 22));

    // 10 cells * 2 columns plus border => 22x22.
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn tetris_view_renders_locked_cell_two_chars_wide() {
    let mut snap = TetrisGame::new(TetrisConfig::default(), 1)
        .unwrap()
        .snapshot();
    snap.board[19 * 10] = Some(Color::Cyan);
    snap.state = PlayfieldState::Running;

    let fb = TetrisView::default().render(&snap, Viewport::new(22, 22));
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn tetris_view_shows_game_over_banner() {
    let mut snap = TetrisGame::new(TetrisConfig::default(), 1)
        .unwrap()
        .snapshot();
    snap.state = PlayfieldState::Lost;
    let fb = TetrisView::default().render(&snap, Viewport::new(40, 24));
    assert!(fb.contains_text("GAME OVER"));
}

#[test]
fn tetris_view_hides_blocks_in_buffer_rows() {
    let mut game = TetrisGame::new(TetrisConfig::default(), 3).unwrap();
    game.start();
    let snap = game.snapshot();
    // The fresh piece sits entirely in the buffer.
    assert!(snap.active.as_ref().unwrap().blocks.iter().all(|&(_, y)| y < 0));

    let fb = TetrisView::default().render(&snap, Viewport::new(22, 22));
    assert!(!fb.line(1).contains('█'));
}

#[test]
fn minefield_view_draws_cursor_and_grid() {
    let field = Minefield::with_mine_layout(4, 6, &[(3, 5)]).unwrap();
    let hud = MinefieldHud {
        cursor: Some((1, 2)),
        elapsed_secs: 7,
        paused: false,
    };
    let view = MinefieldView::default();
    let fb = view.render(&field.snapshot(), hud, Viewport::new(14, 7));

    // Header on row 0, border on row 1, first cell row on row 2.
    assert!(fb.line(0).starts_with("MINES"));
    assert_eq!(fb.get(0, 1).unwrap().ch, '┌');
    assert_eq!(fb.get(1, 2).unwrap().ch, '■');

    let cursor = fb.get(1 + 2 * 2, 2 + 1).unwrap();
    let plain = fb.get(1, 3).unwrap();
    assert_ne!(cursor.style.bg, plain.style.bg);
}

#[test]
fn minefield_view_numbers_after_reveal() {
    let mut field = Minefield::with_mine_layout(3, 4, &[(0, 3), (2, 3)]).unwrap();
    field.left_click(2, 0);
    let fb = MinefieldView::default().render(
        &field.snapshot(),
        MinefieldHud::default(),
        Viewport::new(10, 6),
    );
    // Column 2 borders the mines; (1, 3) is never reached.
    assert_eq!(fb.get(1 + 2 * 2, 2).unwrap().ch, '1');
    assert_eq!(fb.get(1 + 2 * 2, 3).unwrap().ch, '2');
    assert_eq!(fb.get(1 + 3 * 2, 3).unwrap().ch, '■');
    assert_eq!(fb.get(1, 2).unwrap().ch, '·');
}

#[test]
fn diff_encoding_is_smaller_than_full_redraw() {
    let mut game = TetrisGame::new(TetrisConfig::default(), 5).unwrap();
    game.start();
    let view = TetrisView::default();
    let vp = Viewport::new(40, 24);
    let before: FrameBuffer = view.render(&game.snapshot(), vp);
    // Far enough down for the piece to leave the buffer.
    for _ in 0..6 {
        game.move_down();
    }
    let after = view.render(&game.snapshot(), vp);

    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());
}
