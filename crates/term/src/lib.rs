//! Terminal frontend rendering.
//!
//! A small, game-oriented rendering layer. It renders into a framebuffer of
//! styled characters instead of using a widget toolkit, then flushes that
//! framebuffer to the terminal with crossterm.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`TerminalRenderer`] owns the terminal and only writes changed cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_scores as scores;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Span};
pub use game_view::{AnchorY, GameView, ScoreBoardView, Viewport};
pub use renderer::TerminalRenderer;
