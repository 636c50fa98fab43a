//! Score records and the in-memory high-score table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// Entries kept per game when deciding whether a score is a high score.
pub const HIGH_SCORE_SLOTS: usize = 10;

/// Which game produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameKind {
    Minesweeper,
    Tetris,
}

impl GameKind {
    /// Parse game id from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("minesweeper") {
            Some(Self::Minesweeper)
        } else if s.eq_ignore_ascii_case("tetris") {
            Some(Self::Tetris)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Minesweeper => "minesweeper",
            GameKind::Tetris => "tetris",
        }
    }

    /// Minesweeper ranks by time; every other game by points.
    pub fn ranks_by_time(&self) -> bool {
        matches!(self, GameKind::Minesweeper)
    }
}

impl<'de> Deserialize<'de> for GameKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        Self::from_str(s).ok_or_else(|| serde::de::Error::custom("invalid game id"))
    }
}

impl Serialize for GameKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

mod difficulty_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Difficulty;

    pub fn serialize<S: Serializer>(d: &Difficulty, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(d.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Difficulty, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        Difficulty::from_str(s).ok_or_else(|| serde::de::Error::custom("invalid difficulty"))
    }
}

/// Score multiplier for a Minesweeper win
pub fn difficulty_multiplier(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Beginner => 1,
        Difficulty::Intermediate => 2,
        Difficulty::Expert => 3,
    }
}

/// Points for a Minesweeper game: faster wins score more, never below 100
/// before the difficulty multiplier. Losses score nothing.
pub fn minesweeper_score(elapsed_secs: u64, difficulty: Difficulty, won: bool) -> u32 {
    if !won {
        return 0;
    }
    let time_score = 1000u64.saturating_sub(elapsed_secs).max(100) as u32;
    time_score * difficulty_multiplier(difficulty)
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub game: GameKind,
    #[serde(default)]
    pub player_name: String,
    pub score: u32,
    /// Seconds to finish; only recorded for timed wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_secs: Option<f64>,
    #[serde(with = "difficulty_name")]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub won: bool,
    /// Game-specific statistics (lines, level, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ScoreEntry {
    pub fn new(game: GameKind, player_name: &str, score: u32, difficulty: Difficulty) -> Self {
        Self {
            game,
            player_name: player_name.to_string(),
            score,
            time_secs: None,
            difficulty,
            won: false,
            metadata: BTreeMap::new(),
        }
    }

    /// Higher is better. Time-ranked games negate their time; an entry with
    /// no time ranks last.
    pub fn sort_value(&self) -> f64 {
        if self.game.ranks_by_time() {
            -self.time_secs.unwrap_or(f64::MAX)
        } else {
            f64::from(self.score)
        }
    }

    fn rank_cmp(&self, other: &Self) -> Ordering {
        other.sort_value().total_cmp(&self.sort_value())
    }
}

/// In-memory high-score table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    #[serde(default)]
    scores: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Record an entry. Returns whether it made the high-score table.
    pub fn add(&mut self, entry: ScoreEntry) -> bool {
        let high = self.is_high_score(&entry);
        self.scores.push(entry);
        high
    }

    /// Best entries for `game`, best first. Ties keep insertion order.
    pub fn top_scores(&self, game: GameKind, count: usize) -> Vec<&ScoreEntry> {
        let mut ranked: Vec<&ScoreEntry> = self.scores.iter().filter(|s| s.game == game).collect();
        ranked.sort_by(|a, b| a.rank_cmp(b));
        ranked.truncate(count);
        ranked
    }

    /// Whether `entry` would enter the top [`HIGH_SCORE_SLOTS`] of its game.
    pub fn is_high_score(&self, entry: &ScoreEntry) -> bool {
        let top = self.top_scores(entry.game, HIGH_SCORE_SLOTS);
        match top.last() {
            Some(last) if top.len() == HIGH_SCORE_SLOTS => entry.sort_value() > last.sort_value(),
            _ => true,
        }
    }

    /// 1-based rank of a player's best entry among every player's best.
    /// Names compare case-insensitively.
    pub fn player_rank(&self, game: GameKind, player_name: &str) -> Option<usize> {
        let mut best: Vec<&ScoreEntry> = Vec::new();
        for entry in self.top_scores(game, usize::MAX) {
            if !best
                .iter()
                .any(|b| b.player_name.eq_ignore_ascii_case(&entry.player_name))
            {
                best.push(entry);
            }
        }
        best.iter()
            .position(|b| b.player_name.eq_ignore_ascii_case(player_name))
            .map(|i| i + 1)
    }

    /// Every entry by one player, in insertion order.
    pub fn player_scores(&self, player_name: &str) -> Vec<&ScoreEntry> {
        self.scores
            .iter()
            .filter(|s| s.player_name.eq_ignore_ascii_case(player_name))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
