//! Evolver configuration.
//!
//! [`EvolverConfig`] holds every knob of the breeding step. The continuation
//! hook of [`Evolver::evolve_with`](super::Evolver::evolve_with) may replace
//! any of it between generations.

use super::crossover::Crossover;
use super::error::EvolveError;
use super::selection::Selection;
use super::types::Population;

/// Elitism policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Elitism {
    /// Every slot of the next generation is bred.
    #[default]
    None,
    /// The `n` fittest chromosomes are copied unchanged into the next
    /// generation.
    Apply(usize),
}

impl Elitism {
    /// Number of chromosomes carried over.
    pub fn count(self) -> usize {
        match self {
            Elitism::None => 0,
            Elitism::Apply(n) => n,
        }
    }
}

/// Configuration for the [`Evolver`](super::Evolver).
///
/// # Defaults
///
/// ```
/// use evolvr::ga::{Crossover, Elitism, EvolverConfig, Selection};
///
/// let config = EvolverConfig::default();
/// assert_eq!(config.selection, Selection::Rank);
/// assert_eq!(config.crossover, Crossover::Uniform);
/// assert_eq!(config.elitism, Elitism::None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evolvr::ga::{Crossover, Elitism, EvolverConfig, Selection};
///
/// let config = EvolverConfig::default()
///     .with_selection(Selection::Tournament)
///     .with_crossover(Crossover::Point(2))
///     .with_elitism(Elitism::Apply(1))
///     .with_mutation_rate(0.05);
/// ```
#[derive(Debug, Clone)]
pub struct EvolverConfig {
    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Recombination strategy.
    pub crossover: Crossover,

    /// How many of the fittest chromosomes survive unchanged.
    pub elitism: Elitism,

    /// Probability that a bred slot is a crossover child rather than a copy
    /// of a single selected parent.
    ///
    /// Not range-checked. A slot uses crossover when a uniform draw in
    /// `[0, 1)` is below this value, so anything above 1 means always and
    /// anything below 0 (or NaN) means never.
    pub crossover_rate: f64,

    /// Per-gene probability of mutation. Same draw semantics as
    /// [`crossover_rate`](Self::crossover_rate).
    pub mutation_rate: f64,

    /// Whether to run the fitness pass in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            crossover: Crossover::default(),
            elitism: Elitism::default(),
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            parallel: false,
        }
    }
}

impl EvolverConfig {
    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the elitism policy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks this configuration against a population.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    ///
    /// 1. the population is non-empty
    /// 2. a `Point(k)` crossover has `k` below the first chromosome's length
    /// 3. an `Apply(n)` elitism has `n` no larger than the population
    /// 4. with a built-in crossover, every chromosome has the first one's
    ///    length
    ///
    /// Custom crossovers skip the last check.
    pub fn validate_for(&self, population: &Population) -> Result<(), EvolveError> {
        if population.is_empty() {
            return Err(EvolveError::EmptyPopulation);
        }
        if let Crossover::Point(count) = self.crossover {
            let length = population.chromosome_length();
            if count >= length {
                return Err(EvolveError::invalid_point_count(count, length));
            }
        }
        if let Elitism::Apply(count) = self.elitism {
            if count > population.len() {
                return Err(EvolveError::invalid_elitism(count, population.len()));
            }
        }
        if !matches!(self.crossover, Crossover::Custom(_)) {
            let expected = population.chromosome_length();
            let mismatch = population
                .iter()
                .enumerate()
                .find(|(_, c)| c.len() != expected);
            if let Some((index, c)) = mismatch {
                return Err(EvolveError::mismatched_length(index, c.len(), expected));
            }
        }
        Ok(())
    }
}
