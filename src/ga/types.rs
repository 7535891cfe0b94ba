//! Core data model: [`Chromosome`], [`Population`] and the [`Problem`] trait.
//!
//! The engine only knows fixed-length real-valued gene vectors. What the
//! genes mean, how good a vector is, and how a single gene is perturbed are
//! all supplied by the caller through [`Problem`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// A candidate solution: an ordered vector of real-valued genes.
///
/// Besides the genes, a chromosome carries its last evaluated fitness and an
/// engine-private selection weight. The weight is scratch space that every
/// selection call may overwrite; it is never stable across calls and is not
/// part of the public API.
///
/// Fitness is undefined until the [`Evolver`](super::Evolver) evaluates the
/// chromosome; before that it reads as `f64::NEG_INFINITY`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chromosome {
    genes: Vec<f64>,
    fitness: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) weight: f64,
}

impl Default for Chromosome {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Chromosome {
    /// Creates an unevaluated chromosome from its genes.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
            weight: 0.0,
        }
    }

    /// Returns the genes.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Returns the genes mutably. The length cannot change through this view.
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<f64> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the last evaluated fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores a fitness value.
    ///
    /// The selection weight is reseeded from the same value, exactly as the
    /// engine's own fitness pass does.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.weight = fitness;
    }

    /// Builder form of [`set_fitness`](Self::set_fitness).
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.set_fitness(fitness);
        self
    }

    pub(crate) fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

impl From<Vec<f64>> for Chromosome {
    fn from(genes: Vec<f64>) -> Self {
        Self::new(genes)
    }
}

impl FromIterator<f64> for Chromosome {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Chromosome {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.genes[index]
    }
}

impl IndexMut<usize> for Chromosome {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.genes[index]
    }
}

/// The current generation: an ordered collection of chromosomes plus a
/// generation counter starting at 1.
///
/// After every fitness pass the collection is sorted ascending by fitness,
/// so the fittest chromosome is last.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    generation: u64,
}

impl Default for Population {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Population {
    /// Wraps an existing set of chromosomes as generation 1.
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self {
            chromosomes,
            generation: 1,
        }
    }

    /// Builds a population by calling `gene(chromosome_index, gene_index)`
    /// for every gene.
    ///
    /// If either dimension is zero the result holds exactly one empty
    /// chromosome instead of failing.
    ///
    /// ```
    /// use evolvr::ga::Population;
    ///
    /// let pop = Population::generate(3, 2, |c, g| (c * 10 + g) as f64);
    /// assert_eq!(pop.len(), 3);
    /// assert_eq!(pop.chromosomes()[2].genes(), &[20.0, 21.0]);
    ///
    /// let degenerate = Population::generate(0, 5, |_, _| 1.0);
    /// assert_eq!(degenerate.len(), 1);
    /// assert!(degenerate.chromosomes()[0].is_empty());
    /// ```
    pub fn generate<F>(size: usize, length: usize, mut gene: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        if size == 0 || length == 0 {
            return Self::new(vec![Chromosome::default()]);
        }
        let chromosomes = (0..size)
            .map(|c| (0..length).map(|g| gene(c, g)).collect())
            .collect();
        Self::new(chromosomes)
    }

    /// The chromosomes, in their current order.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Mutable access to the chromosomes.
    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    /// Consumes the population, returning its chromosomes.
    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }

    /// Current generation number (starts at 1).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns `true` if there are no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Gene count of the first chromosome, or 0 for an empty population.
    pub fn chromosome_length(&self) -> usize {
        self.chromosomes.first().map_or(0, Chromosome::len)
    }

    /// The chromosome with the highest fitness.
    pub fn best(&self) -> Option<&Chromosome> {
        self.chromosomes.iter().max_by(|a, b| a.cmp_fitness(b))
    }

    /// The chromosome with the lowest fitness.
    pub fn worst(&self) -> Option<&Chromosome> {
        self.chromosomes.iter().min_by(|a, b| a.cmp_fitness(b))
    }

    /// Mean fitness, or `None` for an empty population.
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.chromosomes.is_empty() {
            return None;
        }
        let total: f64 = self.chromosomes.iter().map(Chromosome::fitness).sum();
        Some(total / self.chromosomes.len() as f64)
    }

    /// Iterates over the chromosomes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    /// Stable ascending sort by fitness.
    pub(crate) fn sort_by_fitness(&mut self) {
        self.chromosomes.sort_by(Chromosome::cmp_fitness);
    }

    /// Installs the next generation's chromosomes and bumps the counter.
    pub(crate) fn advance(&mut self, next: Vec<Chromosome>) {
        self.chromosomes = next;
        self.generation += 1;
    }
}

impl From<Vec<Chromosome>> for Population {
    fn from(chromosomes: Vec<Chromosome>) -> Self {
        Self::new(chromosomes)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}

/// Problem-specific behavior plugged into the generic engine.
///
/// Higher fitness is better for every built-in selection strategy.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because the fitness pass may run in
/// parallel when the `parallel` feature is enabled.
///
/// # Implementing
///
/// ```
/// use evolvr::ga::{Chromosome, Problem};
///
/// struct Sphere;
///
/// impl Problem for Sphere {
///     fn fitness(&self, c: &Chromosome) -> f64 {
///         -c.genes().iter().map(|x| x * x).sum::<f64>()
///     }
///     fn mutate(&self, c: &Chromosome, index: usize) -> f64 {
///         c[index] * 0.5
///     }
/// }
/// ```
pub trait Problem: Send + Sync {
    /// Scores one chromosome. Called exactly once per chromosome per
    /// generation.
    fn fitness(&self, chromosome: &Chromosome) -> f64;

    /// Returns the new value for gene `index`.
    ///
    /// Receives the whole child as it stands, so a mutation can depend on
    /// the other genes. Only called for positions selected for mutation.
    fn mutate(&self, chromosome: &Chromosome, index: usize) -> f64;
}

/// A [`Problem`] assembled from two closures.
///
/// ```
/// use evolvr::ga::{Chromosome, FnProblem, Problem};
///
/// let problem = FnProblem::new(
///     |c: &Chromosome| c.genes().iter().sum(),
///     |c: &Chromosome, i| c[i] + 1.0,
/// );
/// let c = Chromosome::new(vec![1.0, 2.0]);
/// assert_eq!(problem.fitness(&c), 3.0);
/// assert_eq!(problem.mutate(&c, 0), 2.0);
/// ```
#[derive(Clone)]
pub struct FnProblem<F, M> {
    fitness: F,
    mutation: M,
}

impl<F, M> FnProblem<F, M>
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
    M: Fn(&Chromosome, usize) -> f64 + Send + Sync,
{
    /// Pairs a fitness closure with a mutation closure.
    pub fn new(fitness: F, mutation: M) -> Self {
        Self { fitness, mutation }
    }
}

impl<F, M> Problem for FnProblem<F, M>
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
    M: Fn(&Chromosome, usize) -> f64 + Send + Sync,
{
    fn fitness(&self, chromosome: &Chromosome) -> f64 {
        (self.fitness)(chromosome)
    }

    fn mutate(&self, chromosome: &Chromosome, index: usize) -> f64 {
        (self.mutation)(chromosome, index)
    }
}
