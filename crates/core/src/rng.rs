//! RNG module - next-piece generation
//!
//! Two randomizers are available:
//!
//! - **Uniform**: every draw picks one of the seven kinds with equal odds.
//! - **Seven-bag**: each bag holds one of every kind, shuffled; the bag is
//!   drawn empty before a new one is shuffled.
//!
//! Both draw from a caller-supplied [`rand::Rng`], so a seeded
//! [`SmallRng`] replays the same sequence.

use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Randomizer;
use crate::types::PieceKind;

/// Piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue<R = SmallRng> {
    randomizer: Randomizer,
    /// Remaining pieces of the current bag, drawn from the back
    bag: ArrayVec<PieceKind, 7>,
    rng: R,
}

impl PieceQueue<SmallRng> {
    /// Create a new piece queue with the given seed
    pub fn seeded(randomizer: Randomizer, seed: u64) -> Self {
        Self::new(randomizer, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PieceQueue<R> {
    pub fn new(randomizer: Randomizer, rng: R) -> Self {
        Self {
            randomizer,
            bag: ArrayVec::new(),
            rng,
        }
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())],
            Randomizer::SevenBag => {
                if self.bag.is_empty() {
                    self.refill_bag();
                }
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = ArrayVec::from(PieceKind::ALL);
        self.bag.shuffle(&mut self.rng);
    }

    /// Pieces left in the current bag (always 0 for the uniform randomizer)
    pub fn bag_remaining(&self) -> usize {
        self.bag.len()
    }
}
