//! Seeded random stream shared between paired simulations

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reference-counted handle to one ChaCha8 stream
///
/// Cloning the handle does NOT fork the stream: both handles advance the
/// same sequence. This is what keeps A/B simulation clones statistically
/// paired. Every draw in the crate goes through these methods.
#[derive(Debug, Clone)]
pub struct SharedRng(Rc<RefCell<ChaCha8Rng>>);

impl SharedRng {
    pub fn seeded(seed: u64) -> Self {
        Self(Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))))
    }

    /// Uniform draw in [0, 1)
    pub fn next_f64(&self) -> f64 {
        self.0.borrow_mut().gen::<f64>()
    }

    /// Uniform index in [0, upper); 0 when `upper` is 0
    pub fn below(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.0.borrow_mut().gen_range(0..upper)
    }

    /// Uniform tie-breaking noise in [0, scale)
    pub fn jitter(&self, scale: f64) -> f64 {
        self.next_f64() * scale
    }

    /// Do both handles advance the same stream?
    pub fn shares_stream_with(&self, other: &SharedRng) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
