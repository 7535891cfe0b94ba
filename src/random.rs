//! Randomness provider.
//!
//! Every draw the engine makes goes through a single generator that the
//! caller owns and injects into [`Evolver`](crate::ga::Evolver). Seeding it
//! with [`create_rng`] makes a whole run reproducible. Shuffles go through
//! [`rand::seq::SliceRandom`] on that same generator.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a seeded, reproducible generator.
///
/// ```
/// use rand::Rng;
/// use evolvr::random::create_rng;
///
/// let a: u64 = create_rng(7).random();
/// let b: u64 = create_rng(7).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from system entropy.
pub fn entropy_rng() -> StdRng {
    create_rng(rand::random())
}
