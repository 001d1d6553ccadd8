//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, session state and simulation
//! logic. It has no dependencies on UI, storage or I/O, which makes it:
//!
//! - **Deterministic**: an injected random source reproduces a piece stream
//! - **Testable**: every rule is a plain function or method returning a value
//! - **Portable**: can run under the terminal frontend or headless
//!
//! # Module Structure
//!
//! - [`board`]: 16x24 grid with collision testing, stamping and line clearing
//! - [`game_state`]: the game session state machine and its commands
//! - [`pieces`]: piece catalog and clockwise rotation
//! - [`rng`]: injectable random sources and the uniform piece spawner
//! - [`scoring`]: line-clear and hard-drop points, score-driven gravity speed
//! - [`snapshot`]: copyable render view of a session
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is an independent draw from the seven kinds
//! - **One-piece preview**: the next piece is always known
//! - **No wall kicks**: a rotation that collides is refused
//! - **Scoring**: 100 points per cleared line, 2 points per hard-dropped row
//! - **Speed**: gravity speeds up by 100ms per 1000 points, down to 100ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{GameCommand, GamePhase};
//!
//! let mut game = GameSession::with_seed(12345);
//! assert_eq!(game.phase(), GamePhase::NotStarted);
//!
//! game.apply(GameCommand::Start);
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::Rotate);
//! game.apply(GameCommand::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The engine has no clock. The frontend calls
//! [`GameSession::tick`](game_state::GameSession::tick) every
//! [`drop_interval_ms`](game_state::GameSession::drop_interval_ms) and must
//! re-read that interval after any command that may have changed the score.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{spawn_position, ActivePiece, GameSession};
pub use pieces::{catalog, rotate, Piece, ShapeMatrix};
pub use rng::{PieceSpawner, RandomSource, SimpleRng, StdRandom};
#[cfg(any(test, feature = "test-support"))]
pub use rng::ScriptedRng;
pub use scoring::{drop_interval_for_score, hard_drop_score, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Overlay};
