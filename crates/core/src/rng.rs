//! RNG module - uniform piece generation
//!
//! The spawner draws every piece independently and uniformly from the seven
//! kinds (no bag, no history). The random source is injected so that tests
//! and replays can reproduce an exact piece stream.
//!
//! Provided sources:
//! - [`SimpleRng`]: small LCG, deterministic from a `u32` seed
//! - [`StdRandom`]: `rand`'s `StdRng`, used by the game binary
//! - `ScriptedRng`: replays a fixed list of choices (tests and the
//!   `test-support` feature only)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Source of uniform random choices.
pub trait RandomSource {
    /// Uniformly pick an index in `0..choices`. `choices` is never 0.
    fn draw(&mut self, choices: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self, choices: usize) -> usize {
        (**self).draw(choices)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn draw(&mut self, choices: usize) -> usize {
        (**self).draw(choices)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn draw(&mut self, choices: usize) -> usize {
        self.next_range(choices as u32) as usize
    }
}

/// Production random source backed by `rand::rngs::StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn draw(&mut self, choices: usize) -> usize {
        self.rng.gen_range(0..choices)
    }
}

/// Replays a fixed cycle of choices.
///
/// Each stored value is reduced modulo the requested number of choices, so a
/// script written as indices into [`PieceKind::ALL`] yields exactly those
/// kinds.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: Vec<usize>,
    cursor: usize,
}

#[cfg(any(test, feature = "test-support"))]
impl ScriptedRng {
    /// Panics if `script` is empty.
    pub fn new(script: Vec<usize>) -> Self {
        assert!(!script.is_empty(), "ScriptedRng needs at least one value");
        Self { script, cursor: 0 }
    }

    /// Script that yields the given kinds in order, then repeats.
    pub fn from_kinds(kinds: &[PieceKind]) -> Self {
        Self::new(kinds.iter().map(|&k| kind_index(k)).collect())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for ScriptedRng {
    fn draw(&mut self, choices: usize) -> usize {
        let value = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        value % choices
    }
}

/// Index of a kind in [`PieceKind::ALL`]
pub fn kind_index(kind: PieceKind) -> usize {
    PieceKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default()
}

/// Uniform i.i.d. piece generator
#[derive(Debug, Clone)]
pub struct PieceSpawner<R> {
    rng: R,
}

impl<R: RandomSource> PieceSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the next piece, in spawn orientation with its catalog color
    pub fn next(&mut self) -> Piece {
        let idx = self.rng.draw(PieceKind::ALL.len());
        Piece::spawn(PieceKind::ALL[idx])
    }
}
