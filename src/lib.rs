//! Generic evolutionary computation engine.
//!
//! Candidate solutions are fixed-length vectors of `f64` genes. The caller
//! provides a fitness function and a per-gene mutation function; the engine
//! provides the machinery around them:
//!
//! - **Selection**: rank, roulette wheel, tournament, or a custom strategy
//! - **Crossover**: k-point, uniform, or a custom operator
//! - **Elitism**: carry the fittest chromosomes forward unchanged
//! - **Generation loop**: one step at a time or under a continuation hook
//!   that may retune the configuration between generations
//!
//! All randomness flows through one injectable generator, so a seeded run
//! is fully reproducible (see [`random`]).
//!
//! # Example
//!
//! ```
//! use evolvr::ga::{Chromosome, Crossover, Elitism, Evolver, EvolverConfig, FnProblem, Population};
//!
//! let problem = FnProblem::new(
//!     |c: &Chromosome| c.genes().iter().sum(),
//!     |c: &Chromosome, i| c[i] + 1.0,
//! );
//! let config = EvolverConfig::default()
//!     .with_crossover(Crossover::Point(1))
//!     .with_elitism(Elitism::Apply(1));
//!
//! let mut population = Population::generate(10, 3, |c, g| (c * g) as f64);
//! let mut evolver = Evolver::with_seed(problem, config, 42);
//! evolver.evolve(&mut population)?;
//!
//! assert_eq!(population.generation(), 2);
//! assert_eq!(population.len(), 10);
//! # Ok::<(), evolvr::ga::EvolveError>(())
//! ```
//!
//! # Logging
//!
//! Warnings (negative fitness, corrected roulette weights) and per-generation
//! progress are emitted through [`tracing`]. The crate never installs a
//! subscriber.

pub mod ga;
pub mod random;
