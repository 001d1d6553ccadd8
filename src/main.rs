//! Terminal runner (default binary).
//!
//! Reads configuration from the environment, loads the leaderboard, then
//! drives a game session from crossterm key events and a gravity deadline.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;

use blockfall::config::AppConfig;
use blockfall::core::{GameSession, GameSnapshot, StdRandom};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::scores::{JsonFileStore, ScoreKeeper};
use blockfall::term::{FrameBuffer, GameView, ScoreBoardView, TerminalRenderer, Viewport};
use blockfall::types::{GameCommand, GamePhase};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        warn!(error = %format!("{e:#}"), "exiting on error");
    }
    result
}

/// Log to a file when one is configured; a TUI cannot share stdout with logs.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            config.log_level,
        ))
        .init();
    info!(level = %config.log_level, "logging initialized");
    Ok(())
}

fn score_board(keeper: &ScoreKeeper<JsonFileStore>) -> ScoreBoardView<'_> {
    ScoreBoardView {
        leaderboard: keeper.leaderboard(),
        last_rank: keeper.last_rank(),
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let mut session = GameSession::new(rng);
    let mut scores = ScoreKeeper::open(
        JsonFileStore::new(&config.scores_path),
        config.player.as_str(),
    );

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut interval = gravity_period(&session);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Some(&score_board(&scores)), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next gravity step.
        let timeout = (last_tick + interval).saturating_duration_since(Instant::now());
        let before = session.phase();

        if event::poll(timeout).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                // Held keys arrive as terminal auto-repeat.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        if command == GameCommand::Start && session.start() {
                            scores.clear_last_rank();
                            last_tick = Instant::now();
                        } else {
                            session.apply(command);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        if last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            session.tick();
        }

        // Scoring commands may have changed the speed.
        interval = gravity_period(&session);

        if let Some(event) = session.take_last_event() {
            if event.lines_cleared > 0 {
                debug!(lines = event.lines_cleared, score = session.score(), "lines cleared");
            }
        }

        if before != GamePhase::GameOver {
            if let Some(score) = session.final_score() {
                scores.record(score);
            }
        }
    }
}

fn gravity_period<R>(session: &GameSession<R>) -> Duration
where
    R: blockfall::core::RandomSource,
{
    Duration::from_millis(u64::from(session.drop_interval_ms()))
}
