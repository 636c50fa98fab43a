//! Minefield engine integration tests.

use grid_arcade::core::{ConfigError, Minefield, MinefieldConfig};
use grid_arcade::types::MinefieldState;

fn states(field: &mut Minefield) -> Vec<(MinefieldState, MinefieldState)> {
    field
        .take_transitions()
        .iter()
        .map(|t| (t.from, t.to))
        .collect()
}

#[test]
fn test_first_click_clears_three_by_three() {
    for seed in 0..200 {
        let mut field = Minefield::new(MinefieldConfig::beginner(), seed).unwrap();
        field.left_click(4, 4);
        assert_eq!(field.state(), MinefieldState::Playing, "seed {seed}");
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(!field.cell(row, col).unwrap().is_mine(), "seed {seed}");
            }
        }
        let mines = field.cells().iter().filter(|c| c.is_mine()).count();
        assert_eq!(mines, 10);
    }
}

#[test]
fn test_first_click_in_corner_is_safe_on_expert() {
    for seed in 0..50 {
        let mut field = Minefield::new(MinefieldConfig::expert(), seed).unwrap();
        assert!(field.left_click(0, 0));
        assert!(!field.cell(0, 1).unwrap().is_mine());
        assert!(!field.cell(1, 0).unwrap().is_mine());
        assert!(!field.cell(1, 1).unwrap().is_mine());
        assert_eq!(field.cell(0, 0).unwrap().adjacent_mines(), 0);
    }
}

#[test]
fn test_flagging_revealed_cell_is_noop() {
    let mut field = Minefield::new(MinefieldConfig::beginner(), 11).unwrap();
    field.left_click(4, 4);
    let before = field.flagged_count();
    assert!(!field.right_click(4, 4));
    assert_eq!(field.flagged_count(), before);
    assert!(!field.cell(4, 4).unwrap().is_flagged());
}

#[test]
fn test_mine_hit_loses_and_shows_every_mine() {
    let layout = [(0, 0), (2, 3), (3, 1)];
    let mut field = Minefield::with_mine_layout(4, 4, &layout).unwrap();
    assert!(field.left_click(0, 3));
    let revealed = field.revealed_count();

    assert!(!field.left_click(2, 3));
    assert_eq!(field.state(), MinefieldState::Lost);
    assert_eq!(field.revealed_count(), revealed);
    for &(row, col) in &layout {
        assert!(field.cell(row, col).unwrap().is_revealed());
    }
    assert_eq!(
        states(&mut field),
        vec![
            (MinefieldState::NotStarted, MinefieldState::Playing),
            (MinefieldState::Playing, MinefieldState::Lost),
        ]
    );

    // Finished games ignore input.
    assert!(!field.left_click(3, 3));
    assert!(!field.right_click(3, 3));
    assert!(states(&mut field).is_empty());
}

#[test]
fn test_reveal_is_idempotent() {
    let mut field = Minefield::with_mine_layout(5, 5, &[(4, 4), (0, 4)]).unwrap();
    assert!(field.left_click(0, 0));
    let snap = field.snapshot();
    assert!(!field.left_click(0, 0));
    assert_eq!(field.snapshot(), snap);
}

#[test]
fn test_flood_fill_opens_zero_region_and_border() {
    // Column 3 is a wall of mines; everything left of it is reachable from (0, 0).
    let mines: Vec<(usize, usize)> = (0..5).map(|r| (r, 3)).collect();
    let mut field = Minefield::with_mine_layout(5, 5, &mines).unwrap();
    assert!(field.left_click(0, 0));

    for row in 0..5 {
        for col in 0..3 {
            assert!(field.cell(row, col).unwrap().is_revealed(), "({row}, {col})");
        }
        assert!(!field.cell(row, 4).unwrap().is_revealed());
    }
    assert_eq!(field.revealed_count(), 15);
    assert_eq!(field.cell(2, 2).unwrap().adjacent_mines(), 3);
    assert_eq!(field.state(), MinefieldState::Playing);
}

#[test]
fn test_flood_fill_stops_at_flags() {
    let mut field = Minefield::with_mine_layout(1, 6, &[(0, 5)]).unwrap();
    assert!(field.right_click(0, 2));
    assert!(field.left_click(0, 0));
    assert!(field.cell(0, 1).unwrap().is_revealed());
    assert!(!field.cell(0, 2).unwrap().is_revealed());
    assert!(!field.cell(0, 3).unwrap().is_revealed());
    assert_eq!(field.revealed_count(), 2);
}

#[test]
fn test_win_fires_once() {
    let mut field = Minefield::with_mine_layout(3, 3, &[(2, 2)]).unwrap();
    assert!(field.left_click(0, 0));
    // (0, 0) has no adjacent mine, so the cascade opens all safe cells.
    assert_eq!(field.state(), MinefieldState::Won);
    assert_eq!(field.revealed_count(), field.total_cells() - field.mine_count());
    assert_eq!(
        states(&mut field),
        vec![
            (MinefieldState::NotStarted, MinefieldState::Playing),
            (MinefieldState::Playing, MinefieldState::Won),
        ]
    );
    assert!(!field.left_click(2, 2));
    assert!(states(&mut field).is_empty());
}

#[test]
fn test_win_by_single_reveals() {
    let mut field = Minefield::with_mine_layout(1, 3, &[(0, 0)]).unwrap();
    assert!(field.left_click(0, 1));
    assert_eq!(field.state(), MinefieldState::Playing);
    assert!(field.left_click(0, 2));
    assert_eq!(field.state(), MinefieldState::Won);
}

#[test]
fn test_config_rejects_unplaceable_mine_counts() {
    assert!(matches!(
        Minefield::new(MinefieldConfig::new(3, 3, 1), 0),
        Err(ConfigError::TooManyMines { requested: 1, max: 0 })
    ));
    assert!(matches!(
        Minefield::new(MinefieldConfig::new(0, 5, 0), 0),
        Err(ConfigError::EmptyBoard)
    ));
    assert!(Minefield::new(MinefieldConfig::new(4, 4, 7), 0).is_ok());
    assert!(Minefield::new(MinefieldConfig::new(4, 4, 8), 0).is_err());
}

#[test]
fn test_dense_board_places_every_mine_outside_safe_zone() {
    for seed in 0..20 {
        let mut field = Minefield::new(MinefieldConfig::new(4, 4, 7), seed).unwrap();
        assert!(field.left_click(1, 1));
        let mines: Vec<_> = field.cells().iter().filter(|c| c.is_mine()).collect();
        assert_eq!(mines.len(), 7);
        assert!(mines.iter().all(|c| c.row() == 3 || c.col() == 3));
    }
}

#[test]
fn test_same_seed_same_layout() {
    let layout = |seed| {
        let mut field = Minefield::new(MinefieldConfig::intermediate(), seed).unwrap();
        field.left_click(8, 8);
        field
            .cells()
            .iter()
            .map(|c| c.is_mine())
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(42), layout(42));
    assert_ne!(layout(42), layout(43));
}
