//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: each bag holds one of each piece
//! (I, O, T, S, Z, J, L), shuffled. Draws walk the bag until it is empty, then the
//! next bag takes over. The next bag is always shuffled one batch ahead so the
//! lookahead piece is known even across a bag boundary.
//!
//! Also provides a small seeded LCG so games are reproducible.

use crate::types::PieceKind;

/// Number of pieces in one bag
pub const BAG_SIZE: usize = 7;

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
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits; the low bits of a power-of-two LCG cycle
    /// with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator with one bag of lookahead
#[derive(Debug, Clone)]
pub struct Bag {
    /// Bag currently being drawn from
    current: [PieceKind; BAG_SIZE],
    /// Already shuffled bag that follows `current`
    upcoming: [PieceKind; BAG_SIZE],
    /// Index of the next piece in `current`
    cursor: usize,
    rng: SimpleRng,
}

impl Bag {
    /// Create a new bag sequence with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Self::shuffled(&mut rng);
        let upcoming = Self::shuffled(&mut rng);
        Self {
            current,
            upcoming,
            cursor: 0,
            rng,
        }
    }

    fn shuffled(rng: &mut SimpleRng) -> [PieceKind; BAG_SIZE] {
        let mut bag = PieceKind::ALL;
        rng.shuffle(&mut bag);
        bag
    }

    /// Draw the next piece, rolling over to a fresh permutation when the bag empties
    pub fn choose(&mut self) -> PieceKind {
        if self.cursor >= BAG_SIZE {
            self.advance_bag();
        }

        let piece = self.current[self.cursor];
        self.cursor += 1;
        piece
    }

    /// The piece the next [`Bag::choose`] call will return
    pub fn peek_next(&self) -> PieceKind {
        if self.cursor < BAG_SIZE {
            self.current[self.cursor]
        } else {
            self.upcoming[0]
        }
    }

    /// Peek at the next `N` pieces in draw order.
    ///
    /// Only one bag is precomputed, so `N` may not exceed [`BAG_SIZE`].
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        debug_assert!(N <= BAG_SIZE, "preview is limited to one bag of lookahead");

        let mut out = [PieceKind::I; N];
        let remaining = &self.current[self.cursor.min(BAG_SIZE)..];
        for (slot, kind) in out
            .iter_mut()
            .zip(remaining.iter().chain(self.upcoming.iter()))
        {
            *slot = *kind;
        }
        out
    }

    fn advance_bag(&mut self) {
        self.current = self.upcoming;
        self.upcoming = Self::shuffled(&mut self.rng);
        self.cursor = 0;
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.current[self.cursor.min(BAG_SIZE)..]
    }

    /// Get the current RNG state (for restarting a game with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}
