//! # Arrival Generator
//!
//! Produces the day's customers: a random pause before each one (uniform in
//! `[0, 2 × rate)`, so the mean gap is `rate`), a name, and hair to cut.

use crate::names::{customer_name, customer_name_count};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::Duration;

/// Hair length on arrival, in millimetres.
pub const HAIR_LENGTH: std::ops::Range<u32> = 100..200;
/// Requested hair length, in millimetres.
pub const HAIR_GOAL: std::ops::Range<u32> = 50..75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    /// Pause before this customer walks in.
    pub delay: Duration,
    pub name: String,
    pub hair_length: u32,
    pub hair_goal: u32,
}

/// A finite stream of [`Arrival`]s.
pub struct Arrivals {
    rng: StdRng,
    rate_ms: u64,
    remaining: usize,
}

impl Arrivals {
    pub fn new(customers: usize, rate_ms: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            rate_ms: rate_ms.max(1),
            remaining: customers,
        }
    }
}

impl Iterator for Arrivals {
    type Item = Arrival;

    fn next(&mut self) -> Option<Arrival> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let upper = self.rate_ms.saturating_mul(2);
        let delay = Duration::from_millis(self.rng.gen_range(0..upper));
        let name = customer_name(self.rng.gen_range(0..customer_name_count())).to_string();
        Some(Arrival {
            delay,
            name,
            hair_length: self.rng.gen_range(HAIR_LENGTH),
            hair_goal: self.rng.gen_range(HAIR_GOAL),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Arrivals {}
