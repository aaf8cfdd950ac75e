//! RNG module - uniform random piece selection
//!
//! Every new piece is drawn uniformly among the seven kinds, independently of
//! previous draws. A small LCG keeps sessions reproducible from a seed.

use crate::shapes::PieceKind;
use crate::types::PIECE_KINDS;

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
        // Low LCG bits are weak; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Draw a piece kind uniformly among the seven
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.next_range(PIECE_KINDS as u32) as usize;
        PieceKind::ALL[index]
    }
}
