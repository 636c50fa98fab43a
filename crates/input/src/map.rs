//! Key mapping from terminal events to game commands.

use crate::types::TetrisAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to Tetris actions.
pub fn handle_key_event(key: KeyEvent) -> Option<TetrisAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(TetrisAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(TetrisAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(TetrisAction::MoveDown)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(TetrisAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(TetrisAction::RotateCcw),

        KeyCode::Char(' ') => Some(TetrisAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TetrisAction::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(TetrisAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(TetrisAction::Restart),

        _ => None,
    }
}

/// What a key press means on the minefield screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinesweeperCommand {
    /// Move the cursor by a row/column delta.
    Move { dr: i8, dc: i8 },
    Reveal,
    Flag,
    Pause,
    Restart,
}

/// Map keyboard input to minefield commands.
pub fn handle_minesweeper_key(key: KeyEvent) -> Option<MinesweeperCommand> {
    use MinesweeperCommand::*;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Move { dr: -1, dc: 0 }),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Move { dr: 1, dc: 0 }),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Move { dr: 0, dc: -1 }),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Move { dr: 0, dc: 1 }),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Reveal),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Flag),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(TetrisAction::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(TetrisAction::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(TetrisAction::MoveDown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(TetrisAction::MoveDown)
        );
    }

    #[test]
    fn test_rotation_and_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(TetrisAction::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(TetrisAction::RotateCcw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(TetrisAction::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(TetrisAction::Hold)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(TetrisAction::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(TetrisAction::Restart)
        );
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), None);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn test_minesweeper_keys() {
        assert_eq!(
            handle_minesweeper_key(KeyEvent::from(KeyCode::Up)),
            Some(MinesweeperCommand::Move { dr: -1, dc: 0 })
        );
        assert_eq!(
            handle_minesweeper_key(KeyEvent::from(KeyCode::Char('l'))),
            Some(MinesweeperCommand::Move { dr: 0, dc: 1 })
        );
        assert_eq!(
            handle_minesweeper_key(KeyEvent::from(KeyCode::Enter)),
            Some(MinesweeperCommand::Reveal)
        );
        assert_eq!(
            handle_minesweeper_key(KeyEvent::from(KeyCode::Char('f'))),
            Some(MinesweeperCommand::Flag)
        );
        assert_eq!(handle_minesweeper_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
