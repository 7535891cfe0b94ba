//! Crossover strategies for real-valued chromosomes.
//!
//! Every strategy turns two equal-length parents into one child of the same
//! length. Each child gene comes from one of the parents at the same
//! position; which parent is passed first does not change the set of
//! children that can be produced.
//!
//! # Operators
//!
//! - [`point_crossover`]: `k` distinct cut points, alternating segments
//! - [`uniform_crossover`]: independent fair coin per gene
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::types::Chromosome;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;

/// A caller-supplied recombination operator.
///
/// Any `Fn(&Chromosome, &Chromosome, &mut dyn RngCore) -> Chromosome`
/// closure implements this trait. No validation is applied to the child.
pub trait CrossoverFn: Send + Sync {
    /// Produces one child from two parents.
    fn combine(&self, a: &Chromosome, b: &Chromosome, rng: &mut dyn RngCore) -> Chromosome;
}

impl<F> CrossoverFn for F
where
    F: Fn(&Chromosome, &Chromosome, &mut dyn RngCore) -> Chromosome + Send + Sync,
{
    fn combine(&self, a: &Chromosome, b: &Chromosome, rng: &mut dyn RngCore) -> Chromosome {
        self(a, b, rng)
    }
}

/// Crossover strategy.
///
/// ```
/// use evolvr::ga::Crossover;
/// use evolvr::random::create_rng;
/// use evolvr::ga::Chromosome;
///
/// let a = Chromosome::new(vec![0.0; 6]);
/// let b = Chromosome::new(vec![1.0; 6]);
/// let child = Crossover::Point(2).combine(&a, &b, &mut create_rng(42));
/// assert_eq!(child.len(), 6);
/// assert_eq!(child[0], 0.0); // first segment always comes from `a`
/// ```
#[derive(Clone, Default)]
pub enum Crossover {
    /// `k`-point crossover. `k` must be less than the chromosome length.
    Point(usize),

    /// Uniform crossover: each gene from either parent with probability 1/2.
    #[default]
    Uniform,

    /// Caller-supplied operator.
    Custom(Arc<dyn CrossoverFn>),
}

impl Crossover {
    /// Wraps a caller-supplied operator.
    pub fn custom<C: CrossoverFn + 'static>(operator: C) -> Self {
        Crossover::Custom(Arc::new(operator))
    }

    /// Recombines two parents into one unevaluated child.
    ///
    /// # Panics
    /// Built-in operators panic if the parents differ in length, and
    /// `Point(k)` panics unless `k` is less than the length.
    pub fn combine<R: RngCore>(&self, a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome {
        match self {
            Crossover::Point(k) => {
                Chromosome::new(point_crossover(a.genes(), b.genes(), *k, rng))
            }
            Crossover::Uniform => Chromosome::new(uniform_crossover(a.genes(), b.genes(), rng)),
            Crossover::Custom(operator) => operator.combine(a, b, rng),
        }
    }
}

impl fmt::Debug for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::Point(k) => f.debug_tuple("Point").field(k).finish(),
            Crossover::Uniform => f.write_str("Uniform"),
            Crossover::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Crossover {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Crossover::Point(a), Crossover::Point(b)) => a == b,
            (Crossover::Uniform, Crossover::Uniform) => true,
            (Crossover::Custom(a), Crossover::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// `k`-point crossover.
///
/// # Algorithm
///
/// 1. Partially shuffle the interior positions `1..len` to draw `k`
///    distinct cut points without bias
/// 2. Sort them and bracket with `0` and `len`
/// 3. Copy segment 0 from `a`, segment 1 from `b`, segment 2 from `a`, …
///
/// `k = 0` returns a copy of `a`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or `k >= len` (for non-empty
/// parents).
pub fn point_crossover<R: Rng + ?Sized>(a: &[f64], b: &[f64], k: usize, rng: &mut R) -> Vec<f64> {
    let len = a.len();
    assert_eq!(len, b.len(), "parents must have equal length");

    let mut interior: Vec<usize> = (1..len).collect();
    assert!(
        k <= interior.len(),
        "crossover point count {k} must be less than chromosome length {len}"
    );

    let (cuts, _) = interior.partial_shuffle(rng, k);
    let mut bounds = Vec::with_capacity(k + 2);
    bounds.push(0);
    bounds.extend_from_slice(cuts);
    bounds[1..].sort_unstable();
    bounds.push(len);

    let mut child = Vec::with_capacity(len);
    for (segment, window) in bounds.windows(2).enumerate() {
        let parent = if segment % 2 == 0 { a } else { b };
        child.extend_from_slice(&parent[window[0]..window[1]]);
    }
    child
}

/// Uniform crossover: a fair coin per gene, no linkage between positions.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng + ?Sized>(a: &[f64], b: &[f64], rng: &mut R) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if rng.random_bool(0.5) { x } else { y })
        .collect()
}
