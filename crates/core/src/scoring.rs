//! Scoring module - classic line-clear points and level progression
//!
//! Points for a lock are `LINE_SCORES[lines] * (level + 1)`, using the level
//! in effect before the lock. Every `LINES_PER_LEVEL` cleared lines raise the
//! level by one and shorten the gravity interval by `DROP_INTERVAL_STEP_MS`,
//! never below `DROP_INTERVAL_MIN_MS`.

use crate::types::{
    DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, STARTING_LEVEL,
};

/// Calculate line clear score
/// lines: number of lines cleared (0-4)
/// level: current level
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .map_or(0, |base| base.saturating_mul(level + 1))
}

/// Gravity interval after one level-up
pub fn next_drop_interval(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(DROP_INTERVAL_STEP_MS)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Level, level-up countdown and gravity interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leveling {
    level: u32,
    lines_until_next_level: i32,
    drop_interval_ms: u32,
}

impl Leveling {
    pub fn new(base_drop_interval_ms: u32) -> Self {
        Self {
            level: STARTING_LEVEL,
            lines_until_next_level: LINES_PER_LEVEL,
            drop_interval_ms: base_drop_interval_ms,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_until_next_level(&self) -> i32 {
        self.lines_until_next_level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Count cleared lines toward the next level. Returns levels gained.
    ///
    /// Overflow carries: a tetris with one line to go leaves 7 to go.
    pub fn record_lines(&mut self, lines: u32) -> u32 {
        self.lines_until_next_level -= lines as i32;
        let mut gained = 0;
        while self.lines_until_next_level <= 0 {
            self.level += 1;
            self.lines_until_next_level += LINES_PER_LEVEL;
            self.drop_interval_ms = next_drop_interval(self.drop_interval_ms);
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 80);
        assert_eq!(calculate_line_score(2, 1), 200);
        assert_eq!(calculate_line_score(3, 1), 600);
        assert_eq!(calculate_line_score(4, 1), 2400);
        assert_eq!(calculate_line_score(4, 3), 4800);
        assert_eq!(calculate_line_score(5, 1), 0);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(next_drop_interval(1000), 950);
        assert_eq!(next_drop_interval(90), 50);
        assert_eq!(next_drop_interval(50), 50);
        assert_eq!(next_drop_interval(20), 50);
    }

    #[test]
    fn test_level_up_after_ten_lines() {
        let mut leveling = Leveling::new(500);
        assert_eq!(leveling.record_lines(4), 0);
        assert_eq!(leveling.record_lines(4), 0);
        assert_eq!(leveling.lines_until_next_level(), 2);
        assert_eq!(leveling.record_lines(2), 1);
        assert_eq!(leveling.level(), 2);
        assert_eq!(leveling.lines_until_next_level(), 10);
        assert_eq!(leveling.drop_interval_ms(), 450);
    }

    #[test]
    fn test_overflow_carries_into_next_level() {
        let mut leveling = Leveling::new(1000);
        leveling.record_lines(3);
        leveling.record_lines(3);
        leveling.record_lines(3);
        assert_eq!(leveling.record_lines(4), 1);
        assert_eq!(leveling.lines_until_next_level(), 7);
    }
}
