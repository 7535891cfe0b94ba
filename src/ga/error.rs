//! Errors and warnings raised by the [`Evolver`](super::Evolver).

use std::fmt;

/// A configuration or population problem that stops `evolve` before any
/// state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvolveError {
    #[error("EmptyPopulation: population has no chromosomes")]
    EmptyPopulation,
    #[error(
        "InvalidCrossoverPointCount: point count must be less than chromosome length. count={count}, chromosome_length={chromosome_length}"
    )]
    InvalidCrossoverPointCount {
        count: usize,
        chromosome_length: usize,
    },
    #[error(
        "InvalidElitismCount: elitism count exceeds population size. count={count}, population_size={population_size}"
    )]
    InvalidElitismCount {
        count: usize,
        population_size: usize,
    },
    #[error(
        "MismatchedChromosomeLength: built-in crossover needs equal-length chromosomes. index={index}, length={length}, expected={expected}"
    )]
    MismatchedChromosomeLength {
        index: usize,
        length: usize,
        expected: usize,
    },
}

impl EvolveError {
    pub(crate) fn invalid_point_count(count: usize, chromosome_length: usize) -> Self {
        Self::InvalidCrossoverPointCount {
            count,
            chromosome_length,
        }
    }

    pub(crate) fn invalid_elitism(count: usize, population_size: usize) -> Self {
        Self::InvalidElitismCount {
            count,
            population_size,
        }
    }

    pub(crate) fn mismatched_length(index: usize, length: usize, expected: usize) -> Self {
        Self::MismatchedChromosomeLength {
            index,
            length,
            expected,
        }
    }
}

/// A non-fatal condition observed during a run.
///
/// Warnings are logged through `tracing` as they happen and collected in
/// [`EvolveReport::warnings`](super::EvolveReport).
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Some chromosomes scored below zero in this generation's fitness pass.
    NegativeFitness { generation: u64, count: usize },
    /// Roulette selection lifted negative weights by `offset` while
    /// breeding from this generation.
    NegativeRouletteWeight { generation: u64, offset: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NegativeFitness { generation, count } => write!(
                f,
                "generation {generation}: {count} chromosome(s) have negative fitness"
            ),
            Warning::NegativeRouletteWeight { generation, offset } => write!(
                f,
                "generation {generation}: negative roulette weight corrected by offset {offset}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_variant() {
        assert!(EvolveError::EmptyPopulation
            .to_string()
            .starts_with("EmptyPopulation"));
        let err = EvolveError::invalid_point_count(4, 3);
        assert_eq!(
            err.to_string(),
            "InvalidCrossoverPointCount: point count must be less than chromosome length. count=4, chromosome_length=3"
        );
        let err = EvolveError::invalid_elitism(6, 5);
        assert!(err.to_string().contains("count=6, population_size=5"));
        let err = EvolveError::mismatched_length(3, 4, 2);
        assert!(err
            .to_string()
            .ends_with("index=3, length=4, expected=2"));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::NegativeFitness {
            generation: 3,
            count: 2,
        };
        assert_eq!(
            w.to_string(),
            "generation 3: 2 chromosome(s) have negative fitness"
        );
    }
}
