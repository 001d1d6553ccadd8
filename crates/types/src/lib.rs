//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal frontend and the score store alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 16 columns (indexed 0-15)
//! - **Height**: 24 rows (indexed 0-23, row 0 at the top)
//!
//! # Speed Ramp
//!
//! Gravity is derived from the score, not from elapsed time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_INTERVAL_MS` | 1000 | Gravity period at score 0 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Speed-up per threshold crossed |
//! | `SPEED_UP_SCORE_STEP` | 1000 | Score between speed-ups |
//! | `MIN_DROP_INTERVAL_MS` | 100 | Fastest gravity |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "T");
//!
//! let color = Color::from_hex("#ffff00").unwrap();
//! assert_eq!(color.to_string(), "#ffff00");
//!
//! assert_eq!(Position::new(7, 0).offset(0, 1), Position::new(7, 1));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (16, 24));
//! ```

use std::fmt;

/// Board width in cells (16 columns)
pub const BOARD_WIDTH: usize = 16;

/// Board height in cells (24 rows)
pub const BOARD_HEIGHT: usize = 24;

/// Gravity interval at the start of a game (1 second per row)
pub const INITIAL_DROP_INTERVAL_MS: u32 = 1000;

/// How much faster gravity gets each time the score crosses a threshold
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Score distance between two speed-ups
pub const SPEED_UP_SCORE_STEP: u32 = 1000;

/// Fastest gravity interval
pub const MIN_DROP_INTERVAL_MS: u32 = 100;

/// Points per cleared line
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per cell travelled by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Number of entries kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

/// The seven piece kinds.
///
/// Each kind has a fixed shape and color in the piece catalog:
/// - **I**: cyan bar
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow square
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order. Random draws index into this array.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Uppercase letter used by the terminal preview
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// 24-bit display color of a piece or board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Top-left offset of a shape matrix in board coordinates.
///
/// Either coordinate may be out of range while a placement is being tested;
/// only collision checks decide whether a position is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Session lifecycle.
///
/// `NotStarted → Running → GameOver`, and back to `NotStarted` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "notStarted",
            GamePhase::Running => "running",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Commands the frontend can send to a game session
///
/// Both keyboard input and the gravity timer are translated into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its lowest position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Leave the intro screen and begin play
    Start,
    /// Wipe the session back to the intro screen
    Restart,
}

/// A single board cell.
///
/// An empty cell never carries a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub filled: bool,
    pub color: Option<Color>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        filled: false,
        color: None,
    };

    pub const fn filled(color: Color) -> Self {
        Self {
            filled: true,
            color: Some(color),
        }
    }
}

/// Emitted every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows travelled by the hard drop that caused the lock (0 for gravity locks)
    pub hard_drop_distance: u32,
    pub lines_cleared: u32,
    /// Points added by the drop bonus and the line clears together
    pub score_gained: u32,
    /// The spawn after this lock was blocked
    pub game_over: bool,
}
