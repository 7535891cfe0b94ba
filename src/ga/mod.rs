//! Genetic algorithm engine for real-valued chromosomes.
//!
//! The engine supplies generic selection, crossover, elitism and the
//! generation loop. Callers supply what is problem-specific by implementing
//! [`Problem`] (or wrapping two closures in [`FnProblem`]).
//!
//! # Key Types
//!
//! - [`Chromosome`]: fixed-length gene vector with its fitness
//! - [`Population`]: ordered chromosomes plus a generation counter
//! - [`EvolverConfig`]: selection, crossover, elitism and operator rates
//! - [`Evolver`]: runs one generation or a caller-controlled loop
//! - [`EvolveReport`]: per-run statistics and warnings
//!
//! # Strategies
//!
//! - [`Selection`]: rank, roulette, tournament or custom ([`SelectFn`])
//! - [`Crossover`]: k-point, uniform or custom ([`CrossoverFn`])
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod crossover;
mod error;
mod evolver;
mod selection;
mod types;

pub use config::{Elitism, EvolverConfig};
pub use crossover::{Crossover, CrossoverFn};
pub use error::{EvolveError, Warning};
pub use evolver::{EvolveReport, Evolver, GenerationStats};
pub use selection::{SelectFn, Selection};
pub use types::{Chromosome, FnProblem, Population, Problem};
