//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L) in shuffled order and
//! is consumed front to back; an empty bag is refilled with a fresh permutation.
//! Between refills every kind appears exactly once, which caps the gap between
//! two pieces of the same kind at 12.
//!
//! The source of randomness is injected through [`RandomSource`] so games can
//! be replayed from a seed. [`SimpleRng`] is the default, deterministic source.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Source of randomness for shuffles and garbage holes
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
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

    /// Current internal state, usable as a seed to resume the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG cycle quickly; hand out the high half.
        self.state >> 16
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag<R: RandomSource = SimpleRng> {
    /// Remaining pieces of the current bag, stored back to front so `pop` takes the front
    pieces: ArrayVec<PieceKind, 7>,
    rng: R,
}

impl Bag<SimpleRng> {
    /// Create a bag driven by a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Bag<R> {
    /// Create a bag driven by any random source. The first permutation is drawn lazily.
    pub fn with_rng(rng: R) -> Self {
        Self {
            pieces: ArrayVec::new(),
            rng,
        }
    }

    /// Replace the bag contents with one fresh permutation of all seven kinds
    pub fn refill(&mut self) {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        self.pieces.clear();
        self.pieces.extend(bag.iter().rev().copied());
    }

    /// Pop the front piece, refilling first if the bag is empty
    pub fn take(&mut self) -> PieceKind {
        if self.pieces.is_empty() {
            self.refill();
        }
        match self.pieces.pop() {
            Some(kind) => kind,
            // refill always leaves seven pieces
            None => unreachable!("bag refill produced no pieces"),
        }
    }

    /// Pieces left in the current bag, front first
    pub fn peek_bag(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces.iter().rev().copied()
    }

    /// Number of pieces left before the next refill
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }
}

impl Default for Bag<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns 0: Fisher-Yates then swaps every element with the front.
    struct ZeroRng;

    impl RandomSource for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = Bag::new(1);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.take()).collect();
        drawn.sort_by_key(|k| k.id());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert_eq!(bag.remaining(), 0);
    }

    #[test]
    fn test_bag_refills_on_exhaustion() {
        let mut bag = Bag::new(7);
        for _ in 0..7 {
            bag.take();
        }
        bag.take();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_peek_matches_take_order() {
        let mut bag = Bag::new(99);
        bag.refill();
        let preview: Vec<PieceKind> = bag.peek_bag().collect();
        let taken: Vec<PieceKind> = (0..7).map(|_| bag.take()).collect();
        assert_eq!(preview, taken);
    }

    #[test]
    fn test_injected_source_is_used() {
        let mut bag = Bag::with_rng(ZeroRng);
        bag.refill();
        let order: Vec<u8> = bag.peek_bag().map(|k| k.id()).collect();
        // i=6 swaps with 0, i=5 swaps with 0, ... deterministic for a constant source
        assert_eq!(order, vec![2, 3, 4, 5, 6, 7, 1]);
    }
}
