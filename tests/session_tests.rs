//! Session and score-board flow through the facade crate.

use std::time::Duration;

use grid_arcade::adapter::{GameKind, MinesweeperSession, ScoreBoard, SessionState, TetrisSession};
use grid_arcade::core::Minefield;
use grid_arcade::types::{Difficulty, TetrisAction};

fn won_minesweeper(player: &str, secs: u64) -> MinesweeperSession {
    let field = Minefield::with_mine_layout(3, 3, &[(2, 2)]).unwrap();
    let mut session = MinesweeperSession::with_field(field, Difficulty::Beginner);
    session.set_player_name(player);
    // (1, 1) touches the mine, so only it opens.
    session.reveal(1, 1);
    session.advance(Duration::from_secs(secs));
    session.reveal(0, 0);
    session
}

#[test]
fn test_finished_games_feed_the_score_board() {
    let mut board = ScoreBoard::new();
    for (player, secs) in [("ada", 90), ("bo", 30), ("cy", 60)] {
        let mut session = won_minesweeper(player, secs);
        assert_eq!(session.state(), SessionState::Won);
        assert!(board.add(session.take_score().unwrap()));
    }

    let top = board.top_scores(GameKind::Minesweeper, 3);
    let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["bo", "cy", "ada"]);
    assert_eq!(top[0].score, 970);
    assert_eq!(board.player_rank(GameKind::Minesweeper, "ADA"), Some(3));

    let restored = ScoreBoard::from_json(&board.to_json().unwrap()).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn test_lost_minesweeper_scores_zero() {
    let field = Minefield::with_mine_layout(3, 3, &[(1, 1)]).unwrap();
    let mut session = MinesweeperSession::with_field(field, Difficulty::Expert);
    assert!(!session.reveal(1, 1));
    assert_eq!(session.state(), SessionState::Lost);
    let entry = session.take_score().unwrap();
    assert_eq!(entry.score, 0);
    assert!(!entry.won);
    assert_eq!(entry.time_secs, None);
}

#[test]
fn test_tetris_restart_clears_pending_score() {
    let mut session = TetrisSession::new(Difficulty::Intermediate, 8).unwrap();
    session.start();
    while session.state() == SessionState::Running {
        session.apply(TetrisAction::HardDrop);
    }
    assert_eq!(session.state(), SessionState::Lost);
    assert!(session.apply(TetrisAction::Restart));
    assert_eq!(session.state(), SessionState::Running);
    assert!(session.take_score().is_none());
    assert_eq!(session.game().pieces_placed(), 0);
    assert_eq!(session.game().drop_interval_ms(), 750);
}

#[test]
fn test_stopped_tetris_ignores_input() {
    let mut session = TetrisSession::new(Difficulty::Beginner, 2).unwrap();
    session.start();
    session.stop();
    assert_eq!(session.state(), SessionState::Stopped);
    assert!(!session.apply(TetrisAction::HardDrop));
    assert_eq!(session.game().pieces_placed(), 0);
    assert!(session.take_score().is_none());
}
