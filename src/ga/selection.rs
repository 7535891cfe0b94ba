//! Selection strategies.
//!
//! Selection chooses one parent from the current generation. The built-in
//! strategies assume **maximization** (higher fitness = better) and a
//! population already sorted ascending by fitness, which the
//! [`Evolver`](super::Evolver) guarantees before breeding.
//!
//! Strategies may overwrite each chromosome's private selection weight and
//! tournament selection reorders the slice, but none of them touch genes or
//! fitness.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A caller-supplied selection policy.
///
/// Receives the whole generation (sorted ascending by fitness) and the
/// engine's random source. The engine applies no validation to what it
/// returns.
///
/// Any `Fn(&[Chromosome], &mut dyn RngCore) -> Chromosome` closure
/// implements this trait.
pub trait SelectFn: Send + Sync {
    /// Chooses one parent.
    fn select(&self, chromosomes: &[Chromosome], rng: &mut dyn RngCore) -> Chromosome;
}

impl<F> SelectFn for F
where
    F: Fn(&[Chromosome], &mut dyn RngCore) -> Chromosome + Send + Sync,
{
    fn select(&self, chromosomes: &[Chromosome], rng: &mut dyn RngCore) -> Chromosome {
        self(chromosomes, rng)
    }
}

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use evolvr::ga::{Chromosome, Selection};
///
/// let rank = Selection::Rank;
///
/// // Always take the fittest (the slice is sorted ascending).
/// let greedy = Selection::custom(
///     |pop: &[Chromosome], _rng: &mut dyn rand::RngCore| -> Chromosome {
///         pop.last().cloned().unwrap_or_default()
///     },
/// );
/// assert_ne!(rank, greedy);
/// ```
#[derive(Clone, Default)]
pub enum Selection {
    /// Rank-proportionate selection.
    ///
    /// Chromosome `i` of the ascending-sorted population gets weight
    /// `i + 1`, so probability depends on rank rather than raw fitness.
    ///
    /// # Complexity
    /// O(n) per selection
    #[default]
    Rank,

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are each chromosome's share of the total fitness. Negative
    /// shares are lifted by the magnitude of the smallest one and reported
    /// as a [`Warning::NegativeRouletteWeight`](super::Warning).
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Tournament selection with a random tournament size.
    ///
    /// Shuffles the population in place, draws `k ∈ [1, n - 1]`, and
    /// returns the highest-weight chromosome among the first `k`.
    ///
    /// # Complexity
    /// O(n) per selection (shuffle)
    Tournament,

    /// Caller-supplied strategy.
    Custom(Arc<dyn SelectFn>),
}

impl Selection {
    /// Wraps a caller-supplied strategy.
    pub fn custom<S: SelectFn + 'static>(strategy: S) -> Self {
        Selection::Custom(Arc::new(strategy))
    }

    /// Selects one parent from `chromosomes`.
    ///
    /// An empty slice yields an empty chromosome for every built-in
    /// strategy.
    pub fn select<R: RngCore>(&self, chromosomes: &mut [Chromosome], rng: &mut R) -> Chromosome {
        self.pick(chromosomes, rng).chromosome
    }

    pub(crate) fn pick<R: RngCore>(&self, chromosomes: &mut [Chromosome], rng: &mut R) -> Pick {
        match self {
            Selection::Rank => Pick::plain(rank(chromosomes, rng)),
            Selection::Roulette => roulette(chromosomes, rng),
            Selection::Tournament => Pick::plain(tournament(chromosomes, rng)),
            Selection::Custom(strategy) => Pick::plain(strategy.select(chromosomes, rng)),
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Rank => f.write_str("Rank"),
            Selection::Roulette => f.write_str("Roulette"),
            Selection::Tournament => f.write_str("Tournament"),
            Selection::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Selection::Rank, Selection::Rank)
            | (Selection::Roulette, Selection::Roulette)
            | (Selection::Tournament, Selection::Tournament) => true,
            (Selection::Custom(a), Selection::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A selected parent plus the roulette correction applied, if any.
pub(crate) struct Pick {
    pub(crate) chromosome: Chromosome,
    pub(crate) roulette_offset: Option<f64>,
}

impl Pick {
    fn plain(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            roulette_offset: None,
        }
    }
}

/// Rank selection over an ascending-sorted slice.
///
/// Falls back to an empty chromosome if the cumulative scan never passes
/// the draw. With integer weights that only happens for an empty slice.
fn rank<R: Rng + ?Sized>(chromosomes: &mut [Chromosome], rng: &mut R) -> Chromosome {
    for (i, c) in chromosomes.iter_mut().enumerate() {
        c.weight = (i + 1) as f64;
    }
    let total: f64 = chromosomes.iter().map(|c| c.weight).sum();
    if total < 1.0 {
        return Chromosome::default();
    }

    let r = rng.random_range(0..total as u64) as f64;
    let mut sum = 0.0;
    for c in chromosomes.iter() {
        sum += c.weight;
        if r < sum {
            return c.clone();
        }
    }

    Chromosome::default()
}

/// Roulette wheel over fitness shares.
fn roulette<R: Rng + ?Sized>(chromosomes: &mut [Chromosome], rng: &mut R) -> Pick {
    let Some(first) = chromosomes.first() else {
        return Pick::plain(Chromosome::default());
    };
    let first = first.clone();

    let total: f64 = chromosomes.iter().map(Chromosome::fitness).sum();
    for c in chromosomes.iter_mut() {
        c.weight = c.fitness() / total;
    }

    let min = chromosomes
        .iter()
        .map(|c| c.weight)
        .fold(f64::INFINITY, f64::min);
    let roulette_offset = if min < 0.0 {
        let offset = min.abs();
        for c in chromosomes.iter_mut() {
            c.weight += offset;
        }
        debug!(offset, "negative roulette weight, shifting all weights");
        Some(offset)
    } else {
        None
    };

    let r: f64 = rng.random();
    let mut sum = 0.0;
    for c in chromosomes.iter() {
        sum += c.weight;
        if sum > r {
            return Pick {
                chromosome: c.clone(),
                roulette_offset,
            };
        }
    }

    // floating-point fallback
    Pick {
        chromosome: first,
        roulette_offset,
    }
}

/// Tournament over a random prefix of a shuffled population.
///
/// Ties on weight keep the earliest contender.
fn tournament<R: Rng + ?Sized>(chromosomes: &mut [Chromosome], rng: &mut R) -> Chromosome {
    let n = chromosomes.len();
    if n == 0 {
        return Chromosome::default();
    }

    chromosomes.shuffle(rng);
    let k = if n > 1 { rng.random_range(1..n) } else { 1 };

    let mut best = &chromosomes[0];
    for c in &chromosomes[1..k] {
        if c.weight > best.weight {
            best = c;
        }
    }
    best.clone()
}
