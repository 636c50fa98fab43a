//! Game state module - the Tetris engine
//!
//! Ties together the board, pieces, piece queue and scoring. Every move is
//! tried on a clone of the falling piece and committed only if the board
//! accepts it. A blocked downward move locks the piece instead.
//!
//! Gravity is driven by the host: call [`TetrisGame::tick`] every
//! [`TetrisGame::drop_interval_ms`] milliseconds while the game runs.
//!
//! Observers drain [`TetrisEvent`]s with [`TetrisGame::take_events`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::{ConfigError, TetrisConfig};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_line_score, Leveling};
use crate::snapshot::{ActiveSnapshot, TetrisSnapshot};
use crate::types::{PieceKind, PlayfieldState, StateTransition, TetrisAction};

pub type PlayfieldTransition = StateTransition<PlayfieldState>;

/// Something observers may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisEvent {
    StateChanged(PlayfieldTransition),
    /// A piece was stamped into the board.
    PieceLocked { lines_cleared: u32, score_delta: u32 },
    LevelUp { level: u32 },
}

/// Outcome of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// Sideways or rotation blocked; nothing changed.
    Blocked,
    /// Downward move blocked; the piece was locked.
    Locked { lines_cleared: u32 },
    /// No falling piece or the game is not running.
    Ignored,
}

impl MoveResult {
    pub fn changed(&self) -> bool {
        matches!(self, MoveResult::Moved | MoveResult::Locked { .. })
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct TetrisGame<R = SmallRng> {
    config: TetrisConfig,
    board: Board,
    current: Option<Tetromino>,
    next: Option<PieceKind>,
    held: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue<R>,
    state: PlayfieldState,
    score: u32,
    lines: u32,
    pieces_placed: u32,
    leveling: Leveling,
    events: Vec<TetrisEvent>,
}

impl TetrisGame<SmallRng> {
    /// Create a new game with the given RNG seed
    pub fn new(config: TetrisConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: TetrisConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_os_rng())
    }
}

impl<R: Rng> TetrisGame<R> {
    pub fn with_rng(config: TetrisConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::from_config(&config),
            current: None,
            next: None,
            held: None,
            can_hold: true,
            queue: PieceQueue::new(config.randomizer, rng),
            state: PlayfieldState::Ready,
            score: 0,
            lines: 0,
            pieces_placed: 0,
            leveling: Leveling::new(config.base_drop_interval_ms),
            events: Vec::new(),
        })
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.state != PlayfieldState::Ready {
            return false;
        }
        self.transition(PlayfieldState::Running);
        self.spawn_piece();
        true
    }

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn state(&self) -> PlayfieldState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.leveling.level()
    }

    pub fn lines_until_next_level(&self) -> i32 {
        self.leveling.lines_until_next_level()
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        self.leveling.drop_interval_ms()
    }

    /// True once the game is lost or the buffer holds a locked block.
    pub fn is_game_over(&self) -> bool {
        self.state == PlayfieldState::Lost || self.board.is_game_over()
    }

    /// Drain events made since the last call.
    pub fn take_events(&mut self) -> Vec<TetrisEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, to: PlayfieldState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.events
            .push(TetrisEvent::StateChanged(StateTransition::new(from, to)));
    }

    /// Promote the next piece, draw a new next, and re-arm hold.
    fn spawn_piece(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.queue.draw(),
        };
        self.next = Some(self.queue.draw());
        self.can_hold = true;
        self.place_at_spawn(kind);
    }

    fn place_at_spawn(&mut self, kind: PieceKind) {
        let piece = Tetromino::spawn(kind, self.config.width);
        if self.board.is_valid_position(&piece) {
            self.current = Some(piece);
        } else {
            self.current = None;
            self.transition(PlayfieldState::Lost);
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> MoveResult {
        if self.state != PlayfieldState::Running {
            return MoveResult::Ignored;
        }
        let Some(current) = self.current.as_ref() else {
            return MoveResult::Ignored;
        };

        let candidate = current.moved(dx, dy);
        if self.board.is_valid_position(&candidate) {
            self.current = Some(candidate);
            MoveResult::Moved
        } else if dy > 0 {
            let lines_cleared = self.lock_piece();
            MoveResult::Locked { lines_cleared }
        } else {
            MoveResult::Blocked
        }
    }

    pub fn move_left(&mut self) -> MoveResult {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> MoveResult {
        self.try_move(1, 0)
    }

    /// Move down one row, locking the piece if it cannot move.
    pub fn move_down(&mut self) -> MoveResult {
        self.try_move(0, 1)
    }

    /// One step of gravity
    pub fn tick(&mut self) -> MoveResult {
        self.move_down()
    }

    fn try_rotate(&mut self, clockwise: bool) -> MoveResult {
        if self.state != PlayfieldState::Running {
            return MoveResult::Ignored;
        }
        let Some(current) = self.current.as_ref() else {
            return MoveResult::Ignored;
        };

        let mut candidate = current.clone();
        if clockwise {
            candidate.rotate_cw();
        } else {
            candidate.rotate_ccw();
        }
        if self.board.is_valid_position(&candidate) {
            self.current = Some(candidate);
            MoveResult::Moved
        } else {
            MoveResult::Blocked
        }
    }

    pub fn rotate_cw(&mut self) -> MoveResult {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> MoveResult {
        self.try_rotate(false)
    }

    /// Where the falling piece would land
    pub fn ghost(&self) -> Option<Tetromino> {
        let mut ghost = self.current.clone()?;
        loop {
            let below = ghost.moved(0, 1);
            if !self.board.is_valid_position(&below) {
                return Some(ghost);
            }
            ghost = below;
        }
    }

    /// Drop to the lowest valid position and lock
    pub fn hard_drop(&mut self) -> MoveResult {
        if self.state != PlayfieldState::Running {
            return MoveResult::Ignored;
        }
        let Some(landed) = self.ghost() else {
            return MoveResult::Ignored;
        };
        self.current = Some(landed);
        let lines_cleared = self.lock_piece();
        MoveResult::Locked { lines_cleared }
    }

    /// Swap active piece with hold piece
    ///
    /// Allowed once per spawned piece. An empty slot takes the current kind
    /// and the next piece spawns; a full slot swaps kinds and the held piece
    /// re-enters at the spawn anchor.
    pub fn hold(&mut self) -> bool {
        if self.state != PlayfieldState::Running || !self.can_hold {
            return false;
        }
        let Some(current) = self.current.take() else {
            return false;
        };

        match self.held.replace(current.kind()) {
            Some(held_kind) => self.place_at_spawn(held_kind),
            None => self.spawn_piece(),
        }
        self.can_hold = false;
        true
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_piece(&mut self) -> u32 {
        let Some(piece) = self.current.take() else {
            return 0;
        };

        self.board.place_tetromino(&piece);
        self.pieces_placed += 1;

        let lines_cleared = self.board.clear_lines();
        let score_delta = calculate_line_score(lines_cleared, self.leveling.level());
        self.score = self.score.saturating_add(score_delta);
        self.lines += lines_cleared;
        self.events.push(TetrisEvent::PieceLocked {
            lines_cleared,
            score_delta,
        });

        if self.leveling.record_lines(lines_cleared) > 0 {
            self.events.push(TetrisEvent::LevelUp {
                level: self.leveling.level(),
            });
        }

        if self.board.is_game_over() {
            self.transition(PlayfieldState::Lost);
        } else {
            self.spawn_piece();
        }
        lines_cleared
    }

    /// Pause or resume. Returns false when the game is neither running nor paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            PlayfieldState::Running => self.transition(PlayfieldState::Paused),
            PlayfieldState::Paused => self.transition(PlayfieldState::Running),
            PlayfieldState::Ready | PlayfieldState::Lost => return false,
        }
        true
    }

    /// Clear the board and statistics and start a new game.
    ///
    /// The piece sequence continues from the current RNG state.
    pub fn restart(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = None;
        self.held = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.pieces_placed = 0;
        self.leveling = Leveling::new(self.config.base_drop_interval_ms);
        self.transition(PlayfieldState::Ready);
        self.start();
    }

    /// Apply a game action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: TetrisAction) -> bool {
        match action {
            TetrisAction::MoveLeft => self.move_left().changed(),
            TetrisAction::MoveRight => self.move_right().changed(),
            TetrisAction::MoveDown => self.move_down().changed(),
            TetrisAction::HardDrop => self.hard_drop().changed(),
            TetrisAction::RotateCw => self.rotate_cw().changed(),
            TetrisAction::RotateCcw => self.rotate_ccw().changed(),
            TetrisAction::Hold => self.hold(),
            TetrisAction::Pause => self.toggle_pause(),
            TetrisAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot(&self) -> TetrisSnapshot {
        let buffer = self.config.buffer_height;
        TetrisSnapshot {
            width: self.config.width,
            height: self.config.height,
            board: self.board.visible_cells().to_vec(),
            active: self
                .current
                .as_ref()
                .map(|p| ActiveSnapshot::from_piece(p, buffer)),
            ghost: self
                .ghost()
                .map(|p| ActiveSnapshot::from_piece(&p, buffer)),
            next: self.next,
            held: self.held,
            can_hold: self.can_hold,
            state: self.state,
            score: self.score,
            level: self.level(),
            lines: self.lines,
            pieces_placed: self.pieces_placed,
            drop_interval_ms: self.drop_interval_ms(),
        }
    }
}

impl Default for TetrisGame<SmallRng> {
    fn default() -> Self {
        Self {
            config: TetrisConfig::default(),
            board: Board::default(),
            current: None,
            next: None,
            held: None,
            can_hold: true,
            queue: PieceQueue::seeded(TetrisConfig::default().randomizer, 1),
            state: PlayfieldState::Ready,
            score: 0,
            lines: 0,
            pieces_placed: 0,
            leveling: Leveling::new(TetrisConfig::default().base_drop_interval_ms),
            events: Vec::new(),
        }
    }
}
