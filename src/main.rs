//! Terminal runner for both grid games (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};

use grid_arcade::adapter::{MinesweeperSession, ScoreBoard, ScoreEntry, SessionState, TetrisSession};
use grid_arcade::core::{Minefield, MinefieldConfig, TetrisConfig, TetrisGame};
use grid_arcade::input::{handle_key_event, handle_minesweeper_key, should_quit, MinesweeperCommand};
use grid_arcade::term::{FrameBuffer, MinefieldHud, MinefieldView, TerminalRenderer, TetrisView, Viewport};
use grid_arcade::types::Difficulty;

/// Redraw cadence for the minefield clock.
const MINEFIELD_FRAME: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "grid-arcade", about = "Terminal Minesweeper and Tetris", version)]
struct Cli {
    #[command(subcommand)]
    game: GameCommand,
    /// Player name recorded with scores
    #[arg(long, global = true, default_value = "player")]
    name: String,
    /// JSON file holding the high-score table
    #[arg(long, global = true)]
    scores: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum GameCommand {
    /// Play Minesweeper
    Minesweeper(GameArgs),
    /// Play Tetris
    Tetris(GameArgs),
}

#[derive(Args, Debug)]
struct GameArgs {
    /// beginner, intermediate or expert
    #[arg(long, default_value = "beginner", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// Seed for mine placement / piece order (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON board configuration; overrides the difficulty preset
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty `{s}`"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build the session before touching the terminal so config errors print normally.
    let mut game = match &cli.game {
        GameCommand::Minesweeper(args) => Game::Minesweeper(minesweeper_session(args)?),
        GameCommand::Tetris(args) => Game::Tetris(tetris_session(args)?),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = match &mut game {
        Game::Minesweeper(session) => run_minesweeper(&mut term, session, &cli),
        Game::Tetris(session) => run_tetris(&mut term, session, &cli),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

enum Game {
    Minesweeper(MinesweeperSession),
    Tetris(TetrisSession),
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))
}

fn minesweeper_session(args: &GameArgs) -> Result<MinesweeperSession> {
    let config = match &args.config {
        Some(path) => MinefieldConfig::from_json_str(&read_config(path)?)?,
        None => MinefieldConfig::for_difficulty(args.difficulty),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    Ok(MinesweeperSession::with_field(
        Minefield::new(config, seed)?,
        score_difficulty(&config, args.difficulty),
    ))
}

/// A config file matching a preset scores as that preset; custom boards keep
/// the requested difficulty.
fn score_difficulty(config: &MinefieldConfig, requested: Difficulty) -> Difficulty {
    config.difficulty().unwrap_or(requested)
}

fn tetris_session(args: &GameArgs) -> Result<TetrisSession> {
    let config = match &args.config {
        Some(path) => TetrisConfig::from_json_str(&read_config(path)?)?,
        None => TetrisConfig::for_difficulty(args.difficulty),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    Ok(TetrisSession::with_game(TetrisGame::new(config, seed)?, args.difficulty))
}

/// Append a finished game to the score file, if one was given.
fn record_score(path: Option<&Path>, entry: ScoreEntry) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let mut board = if path.exists() {
        ScoreBoard::from_json(&fs::read_to_string(path)?)
            .with_context(|| format!("parsing scores {}", path.display()))?
    } else {
        ScoreBoard::new()
    };
    board.add(entry);
    fs::write(path, board.to_json()?)
        .with_context(|| format!("writing scores {}", path.display()))?;
    Ok(())
}

fn step(pos: usize, delta: i8, len: usize) -> usize {
    pos.saturating_add_signed(isize::from(delta))
        .min(len.saturating_sub(1))
}

fn run_minesweeper(term: &mut TerminalRenderer, session: &mut MinesweeperSession, cli: &Cli) -> Result<()> {
    session.set_player_name(&cli.name);
    let view = MinefieldView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = (0usize, 0usize);
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        session.advance(now - last);
        last = now;

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = MinefieldHud {
            cursor: Some(cursor),
            elapsed_secs: session.elapsed().as_secs(),
            paused: session.state() == SessionState::Paused,
        };
        view.render_into(&session.field().snapshot(), hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if event::poll(MINEFIELD_FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        session.stop();
                        return Ok(());
                    }
                    let (rows, cols) = (session.field().rows(), session.field().cols());
                    match handle_minesweeper_key(key) {
                        Some(MinesweeperCommand::Move { dr, dc }) => {
                            cursor = (step(cursor.0, dr, rows), step(cursor.1, dc, cols));
                        }
                        Some(MinesweeperCommand::Reveal) => {
                            session.reveal(cursor.0, cursor.1);
                        }
                        Some(MinesweeperCommand::Flag) => {
                            session.toggle_flag(cursor.0, cursor.1);
                        }
                        Some(MinesweeperCommand::Pause) => {
                            if !session.pause() {
                                session.resume();
                            }
                        }
                        Some(MinesweeperCommand::Restart) => session.restart(),
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(entry) = session.take_score() {
            record_score(cli.scores.as_deref(), entry)?;
        }
        session.take_transitions();
    }
}

fn run_tetris(term: &mut TerminalRenderer, session: &mut TetrisSession, cli: &Cli) -> Result<()> {
    session.set_player_name(&cli.name);
    session.start();

    let view = TetrisView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&session.game().snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Gravity interval shrinks as the level rises.
        let interval = Duration::from_millis(u64::from(session.game().drop_interval_ms()));
        let timeout = interval.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        session.stop();
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let since = last_tick.elapsed();
        if since >= interval {
            session.advance(since);
            last_tick = Instant::now();
            session.tick();
        }

        if let Some(entry) = session.take_score() {
            record_score(cli.scores.as_deref(), entry)?;
        }
        // The TUI reads state from snapshots; queued events are dropped.
        session.take_events();
        session.take_transitions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_config_overrides_requested_difficulty() {
        let config = MinefieldConfig::expert();
        assert_eq!(score_difficulty(&config, Difficulty::Beginner), Difficulty::Expert);

        let custom = MinefieldConfig::new(12, 12, 20);
        assert_eq!(score_difficulty(&custom, Difficulty::Intermediate), Difficulty::Intermediate);
    }

    #[test]
    fn cursor_step_stays_on_the_board() {
        assert_eq!(step(0, -1, 9), 0);
        assert_eq!(step(8, 1, 9), 8);
        assert_eq!(step(3, 1, 9), 4);
    }
}
