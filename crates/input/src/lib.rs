//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]. Terminal
//! key repeat is relied on for held keys; the engine itself has no notion of
//! held input.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
