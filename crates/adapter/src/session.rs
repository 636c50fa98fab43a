//! Session wrappers that put both engines behind one lifecycle.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    ConfigError, Minefield, MinefieldConfig, MoveResult, TetrisConfig, TetrisEvent, TetrisGame,
};
use crate::scores::{minesweeper_score, GameKind, ScoreEntry};
use crate::types::{Difficulty, MinefieldState, PlayfieldState, StateTransition, TetrisAction};

/// Lifecycle shared by every hosted game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    NotInitialized,
    Ready,
    Running,
    Paused,
    Won,
    Lost,
    Stopped,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotInitialized => "notInitialized",
            SessionState::Ready => "ready",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Won => "won",
            SessionState::Lost => "lost",
            SessionState::Stopped => "stopped",
        }
    }

    /// No further input is accepted until restart.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SessionState::Won | SessionState::Lost | SessionState::Stopped
        )
    }
}

impl From<MinefieldState> for SessionState {
    fn from(value: MinefieldState) -> Self {
        match value {
            MinefieldState::NotStarted => SessionState::Ready,
            MinefieldState::Playing => SessionState::Running,
            MinefieldState::Won => SessionState::Won,
            MinefieldState::Lost => SessionState::Lost,
        }
    }
}

impl From<PlayfieldState> for SessionState {
    fn from(value: PlayfieldState) -> Self {
        match value {
            PlayfieldState::Ready => SessionState::Ready,
            PlayfieldState::Running => SessionState::Running,
            PlayfieldState::Paused => SessionState::Paused,
            PlayfieldState::Lost => SessionState::Lost,
        }
    }
}

pub type SessionTransition = StateTransition<SessionState>;

/// Bookkeeping shared by both session kinds
#[derive(Debug, Clone, Default)]
struct Lifecycle {
    state: SessionState,
    elapsed: Duration,
    transitions: Vec<SessionTransition>,
}

impl Lifecycle {
    fn set(&mut self, to: SessionState) {
        let from = self.state;
        if from != to {
            self.state = to;
            self.transitions.push(StateTransition::new(from, to));
        }
    }

    fn advance(&mut self, dt: Duration) {
        if self.state == SessionState::Running {
            self.elapsed += dt;
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.set(SessionState::Ready);
    }
}

/// A Minesweeper game under the session contract
///
/// The engine has no pause of its own; pausing here freezes the clock and
/// rejects clicks.
#[derive(Debug, Clone)]
pub struct MinesweeperSession<R = SmallRng> {
    difficulty: Difficulty,
    player_name: String,
    field: Minefield<R>,
    life: Lifecycle,
    score: Option<ScoreEntry>,
}

impl MinesweeperSession<SmallRng> {
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self, ConfigError> {
        let field = Minefield::new(MinefieldConfig::for_difficulty(difficulty), seed)?;
        Ok(Self::with_field(field, difficulty))
    }
}

impl<R: Rng> MinesweeperSession<R> {
    /// Wrap an existing minefield. `difficulty` labels the score and picks
    /// its multiplier.
    pub fn with_field(field: Minefield<R>, difficulty: Difficulty) -> Self {
        let mut life = Lifecycle::default();
        life.set(SessionState::Ready);
        Self {
            difficulty,
            player_name: String::new(),
            field,
            life,
            score: None,
        }
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.to_string();
    }

    pub fn field(&self) -> &Minefield<R> {
        &self.field
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> SessionState {
        self.life.state
    }

    pub fn elapsed(&self) -> Duration {
        self.life.elapsed
    }

    /// Feed wall-clock time; only counted while running.
    pub fn advance(&mut self, dt: Duration) {
        self.life.advance(dt);
    }

    fn accepts_input(&self) -> bool {
        matches!(self.life.state, SessionState::Ready | SessionState::Running)
    }

    pub fn reveal(&mut self, row: usize, col: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let revealed = self.field.left_click(row, col);
        self.sync();
        revealed
    }

    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.field.right_click(row, col)
    }

    pub fn pause(&mut self) -> bool {
        if self.life.state != SessionState::Running {
            return false;
        }
        self.life.set(SessionState::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.life.state != SessionState::Paused {
            return false;
        }
        self.life.set(SessionState::Running);
        true
    }

    /// Abandon the game. No score is produced.
    pub fn stop(&mut self) {
        if !self.life.state.is_finished() {
            self.life.set(SessionState::Stopped);
        }
    }

    pub fn restart(&mut self) {
        self.field.initialize();
        self.score = None;
        self.life.reset();
    }

    /// The score of the finished game, handed out once.
    pub fn take_score(&mut self) -> Option<ScoreEntry> {
        self.score.take()
    }

    pub fn take_transitions(&mut self) -> Vec<SessionTransition> {
        std::mem::take(&mut self.life.transitions)
    }

    fn sync(&mut self) {
        for t in self.field.take_transitions() {
            self.life.set(t.to.into());
            if t.to.is_finished() {
                self.score = Some(self.build_score(t.to == MinefieldState::Won));
            }
        }
    }

    fn build_score(&self, won: bool) -> ScoreEntry {
        let secs = self.life.elapsed.as_secs();
        let points = minesweeper_score(secs, self.difficulty, won);
        let mut entry = ScoreEntry::new(GameKind::Minesweeper, &self.player_name, points, self.difficulty);
        entry.won = won;
        if won {
            entry.time_secs = Some(self.life.elapsed.as_secs_f64());
        }
        entry
            .metadata
            .insert("mines".to_string(), self.field.mine_count().into());
        entry
            .metadata
            .insert("revealed".to_string(), self.field.revealed_count().into());
        entry
    }
}

/// A Tetris game under the session contract
#[derive(Debug, Clone)]
pub struct TetrisSession<R = SmallRng> {
    difficulty: Difficulty,
    player_name: String,
    game: TetrisGame<R>,
    life: Lifecycle,
    events: Vec<TetrisEvent>,
    score: Option<ScoreEntry>,
}

impl TetrisSession<SmallRng> {
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self, ConfigError> {
        let game = TetrisGame::new(TetrisConfig::for_difficulty(difficulty), seed)?;
        Ok(Self::with_game(game, difficulty))
    }
}

impl<R: Rng> TetrisSession<R> {
    pub fn with_game(game: TetrisGame<R>, difficulty: Difficulty) -> Self {
        let mut life = Lifecycle::default();
        life.set(game.state().into());
        Self {
            difficulty,
            player_name: String::new(),
            game,
            life,
            events: Vec::new(),
            score: None,
        }
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.to_string();
    }

    pub fn game(&self) -> &TetrisGame<R> {
        &self.game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> SessionState {
        self.life.state
    }

    pub fn elapsed(&self) -> Duration {
        self.life.elapsed
    }

    pub fn advance(&mut self, dt: Duration) {
        self.life.advance(dt);
    }

    pub fn start(&mut self) -> bool {
        let started = self.game.start();
        self.sync();
        started
    }

    pub fn apply(&mut self, action: TetrisAction) -> bool {
        if self.life.state == SessionState::Stopped {
            return false;
        }
        if action == TetrisAction::Restart {
            self.restart();
            return true;
        }
        let changed = self.game.apply_action(action);
        self.sync();
        changed
    }

    /// One step of gravity
    pub fn tick(&mut self) -> MoveResult {
        if self.life.state == SessionState::Stopped {
            return MoveResult::Ignored;
        }
        let result = self.game.tick();
        self.sync();
        result
    }

    /// Abandon the game. No score is produced.
    pub fn stop(&mut self) {
        if !self.life.state.is_finished() {
            self.life.set(SessionState::Stopped);
        }
    }

    pub fn restart(&mut self) {
        self.score = None;
        self.life.reset();
        self.game.restart();
        self.sync();
    }

    pub fn take_score(&mut self) -> Option<ScoreEntry> {
        self.score.take()
    }

    pub fn take_transitions(&mut self) -> Vec<SessionTransition> {
        std::mem::take(&mut self.life.transitions)
    }

    /// Engine events since the last call, state changes included.
    pub fn take_events(&mut self) -> Vec<TetrisEvent> {
        std::mem::take(&mut self.events)
    }

    fn sync(&mut self) {
        for event in self.game.take_events() {
            if let TetrisEvent::StateChanged(t) = event {
                self.life.set(t.to.into());
                if t.to == PlayfieldState::Lost {
                    self.score = Some(self.build_score());
                }
            }
            self.events.push(event);
        }
    }

    fn build_score(&self) -> ScoreEntry {
        let mut entry = ScoreEntry::new(
            GameKind::Tetris,
            &self.player_name,
            self.game.score(),
            self.difficulty,
        );
        let stats = [
            ("lines", self.game.lines()),
            ("level", self.game.level()),
            ("pieces", self.game.pieces_placed()),
        ];
        for (key, value) in stats {
            entry.metadata.insert(key.to_string(), value.into());
        }
        entry
    }
}
