//! Generation loop.
//!
//! [`Evolver`] orchestrates one generation step and the caller-controlled
//! loop around it:
//! evaluation → elitism → selection → crossover → mutation → evaluation.

use super::config::EvolverConfig;
use super::error::{EvolveError, Warning};
use super::selection::Selection;
use super::types::{Chromosome, Population, Problem};
use crate::random::{create_rng, entropy_rng};
use rand::rngs::StdRng;
use rand::{Rng, RngCore};
use tracing::{debug, warn};

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation number the statistics belong to.
    pub generation: u64,
    /// Highest fitness.
    pub best: f64,
    /// Lowest fitness.
    pub worst: f64,
    /// Mean fitness.
    pub mean: f64,
}

impl GenerationStats {
    /// Summarizes an evaluated (ascending-sorted) population.
    fn of(population: &Population) -> Self {
        let chromosomes = population.chromosomes();
        Self {
            generation: population.generation(),
            best: chromosomes.last().map_or(f64::NAN, Chromosome::fitness),
            worst: chromosomes.first().map_or(f64::NAN, Chromosome::fitness),
            mean: population.mean_fitness().unwrap_or(f64::NAN),
        }
    }
}

/// Outcome of an `evolve*` call.
#[derive(Debug, Clone, Default)]
pub struct EvolveReport {
    /// Number of generations bred by this call.
    pub generations: usize,

    /// Highest fitness in the final population.
    pub best_fitness: f64,

    /// Statistics of the starting population followed by one entry per bred
    /// generation, so it holds `generations + 1` entries.
    pub history: Vec<GenerationStats>,

    /// Non-fatal conditions, in the order they occurred.
    pub warnings: Vec<Warning>,
}

/// Borrowed continuation hook: gets exclusive access to the configuration
/// and read access to the freshly evaluated population, returns whether to
/// breed another generation.
type Continuation<'a> = &'a mut dyn FnMut(&mut EvolverConfig, &Population) -> bool;

/// Drives evolution of a [`Population`].
///
/// The evolver owns the problem, the configuration and the random source.
/// Seeding the source ([`with_seed`](Self::with_seed) or
/// [`with_rng`](Self::with_rng)) makes every run reproducible.
///
/// # Usage
///
/// ```
/// use evolvr::ga::{Chromosome, Elitism, Evolver, EvolverConfig, FnProblem, Population};
///
/// let problem = FnProblem::new(
///     |c: &Chromosome| -c.genes().iter().map(|x| x * x).sum::<f64>(),
///     |c: &Chromosome, i| c[i] * 0.9,
/// );
/// let config = EvolverConfig::default().with_elitism(Elitism::Apply(2));
/// let mut evolver = Evolver::with_seed(problem, config, 42);
///
/// let mut population = Population::generate(20, 4, |c, g| (c + g) as f64);
/// let report = evolver
///     .evolve_with(&mut population, |_config, pop| pop.generation() < 10)
///     .unwrap();
///
/// assert_eq!(population.generation(), 10);
/// assert_eq!(report.generations, 9);
/// ```
pub struct Evolver<P, R = StdRng> {
    problem: P,
    config: EvolverConfig,
    rng: R,
}

impl<P: Problem> Evolver<P, StdRng> {
    /// Creates an evolver whose random source is seeded from system entropy.
    pub fn new(problem: P, config: EvolverConfig) -> Self {
        Self::with_rng(problem, config, entropy_rng())
    }

    /// Creates an evolver with a reproducible random source.
    pub fn with_seed(problem: P, config: EvolverConfig, seed: u64) -> Self {
        Self::with_rng(problem, config, create_rng(seed))
    }
}

impl<P: Problem, R: RngCore> Evolver<P, R> {
    /// Creates an evolver drawing from a caller-supplied random source.
    pub fn with_rng(problem: P, config: EvolverConfig, rng: R) -> Self {
        Self {
            problem,
            config,
            rng,
        }
    }

    /// The problem being optimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The current configuration.
    pub fn config(&self) -> &EvolverConfig {
        &self.config
    }

    /// Mutable access to the configuration between calls.
    pub fn config_mut(&mut self) -> &mut EvolverConfig {
        &mut self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: EvolverConfig) {
        self.config = config;
    }

    /// The random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Breeds exactly one generation.
    ///
    /// On success every chromosome's fitness reflects the new generation
    /// and the population is sorted ascending by fitness.
    ///
    /// # Errors
    /// Returns an [`EvolveError`] before evaluating or mutating anything if
    /// the population is empty or the configuration does not fit it.
    ///
    /// # Panics
    /// A custom selection that hands the built-in crossover parents of
    /// different lengths makes the crossover panic mid-generation.
    pub fn evolve(&mut self, population: &mut Population) -> Result<EvolveReport, EvolveError> {
        self.run(population, None)
    }

    /// Breeds generations until `continuation` returns `false`.
    ///
    /// The hook runs once after every bred generation. It may rewrite the
    /// configuration; the rewritten configuration is validated again before
    /// the next generation is bred.
    ///
    /// # Errors
    /// Fails up front like [`evolve`](Self::evolve). If the hook leaves an
    /// invalid configuration the loop stops with that error; generations
    /// already bred stay in `population`.
    pub fn evolve_with<F>(
        &mut self,
        population: &mut Population,
        mut continuation: F,
    ) -> Result<EvolveReport, EvolveError>
    where
        F: FnMut(&mut EvolverConfig, &Population) -> bool,
    {
        self.run(population, Some(&mut continuation))
    }

    /// Breeds exactly `generations` generations.
    ///
    /// `0` only validates and evaluates the population.
    pub fn evolve_generations(
        &mut self,
        population: &mut Population,
        generations: usize,
    ) -> Result<EvolveReport, EvolveError> {
        if generations == 0 {
            self.check(population)?;
            let mut report = EvolveReport::default();
            self.evaluate(population, &mut report);
            report.best_fitness = population.best().map_or(f64::NAN, Chromosome::fitness);
            return Ok(report);
        }

        let mut remaining = generations - 1;
        self.evolve_with(population, |_, _| {
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            true
        })
    }

    fn run(
        &mut self,
        population: &mut Population,
        mut continuation: Option<Continuation<'_>>,
    ) -> Result<EvolveReport, EvolveError> {
        self.check(population)?;

        let mut report = EvolveReport::default();
        self.evaluate(population, &mut report);

        loop {
            self.breed(population, &mut report);
            self.evaluate(population, &mut report);
            report.generations += 1;

            let again = match continuation.as_deref_mut() {
                Some(hook) => hook(&mut self.config, &*population),
                None => false,
            };
            if !again {
                break;
            }
            self.check(population)?;
        }

        report.best_fitness = population.best().map_or(f64::NAN, Chromosome::fitness);
        Ok(report)
    }

    fn check(&self, population: &Population) -> Result<(), EvolveError> {
        self.config.validate_for(population).inspect_err(|err| {
            debug!(%err, generation = population.generation(), "configuration rejected");
        })
    }

    /// Scores every chromosome, records warnings and statistics, and sorts
    /// the population ascending by fitness.
    fn evaluate(&self, population: &mut Population, report: &mut EvolveReport) {
        evaluate_population(&self.problem, population.chromosomes_mut(), self.config.parallel);

        let generation = population.generation();
        let negative = population.iter().filter(|c| c.fitness() < 0.0).count();
        if negative > 0 {
            warn!(generation, count = negative, "negative fitness values");
            report.warnings.push(Warning::NegativeFitness {
                generation,
                count: negative,
            });
        }

        population.sort_by_fitness();

        let stats = GenerationStats::of(population);
        debug!(
            generation,
            best = stats.best,
            mean = stats.mean,
            "generation evaluated"
        );
        report.history.push(stats);
    }

    /// Replaces the population with a bred generation of the same size.
    fn breed(&mut self, population: &mut Population, report: &mut EvolveReport) {
        let size = population.len();
        let generation = population.generation();
        let elite = self.config.elitism.count().min(size);

        let mut next = Vec::with_capacity(size);
        next.extend_from_slice(&population.chromosomes()[size - elite..]);

        let mut roulette_offset = None;
        let parents = population.chromosomes_mut();
        while next.len() < size {
            let selection = &self.config.selection;
            let mut child = if self.rng.random::<f64>() < self.config.crossover_rate {
                let a = select_parent(selection, parents, &mut self.rng, &mut roulette_offset);
                let b = select_parent(selection, parents, &mut self.rng, &mut roulette_offset);
                self.config.crossover.combine(&a, &b, &mut self.rng)
            } else {
                let parent = select_parent(selection, parents, &mut self.rng, &mut roulette_offset);
                Chromosome::new(parent.into_genes())
            };

            for index in 0..child.len() {
                if self.rng.random::<f64>() < self.config.mutation_rate {
                    let value = self.problem.mutate(&child, index);
                    child[index] = value;
                }
            }
            next.push(child);
        }

        if let Some(offset) = roulette_offset {
            warn!(generation, offset, "negative roulette weights corrected");
            report
                .warnings
                .push(Warning::NegativeRouletteWeight { generation, offset });
        }

        population.advance(next);
    }
}

/// Picks one parent, remembering the largest roulette correction seen.
fn select_parent<R: RngCore>(
    selection: &Selection,
    parents: &mut [Chromosome],
    rng: &mut R,
    roulette_offset: &mut Option<f64>,
) -> Chromosome {
    let pick = selection.pick(parents, rng);
    if let Some(offset) = pick.roulette_offset {
        *roulette_offset = Some(roulette_offset.map_or(offset, |seen| seen.max(offset)));
    }
    pick.chromosome
}

/// Evaluate all chromosomes. Each worker owns a disjoint chromosome; the
/// caller sorts only after every evaluation has finished.
fn evaluate_population<P: Problem>(problem: &P, chromosomes: &mut [Chromosome], parallel: bool) {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        chromosomes.par_iter_mut().for_each(|c| {
            let f = problem.fitness(c);
            c.set_fitness(f);
        });
        return;
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for c in chromosomes.iter_mut() {
        let f = problem.fitness(c);
        c.set_fitness(f);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Crossover, Elitism, FnProblem};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sum_fitness(c: &Chromosome) -> f64 {
        c.genes().iter().sum()
    }

    fn no_mutation(c: &Chromosome, i: usize) -> f64 {
        c[i]
    }

    type SumProblem = FnProblem<fn(&Chromosome) -> f64, fn(&Chromosome, usize) -> f64>;

    fn sum_problem() -> SumProblem {
        FnProblem::new(
            sum_fitness as fn(&Chromosome) -> f64,
            no_mutation as fn(&Chromosome, usize) -> f64,
        )
    }

    fn fixed_population() -> Population {
        Population::new(vec![
            Chromosome::new(vec![1.0, 2.0]),
            Chromosome::new(vec![5.0, 5.0]),
            Chromosome::new(vec![0.0, 1.0]),
            Chromosome::new(vec![3.0, 3.0]),
            Chromosome::new(vec![2.0, 2.0]),
        ])
    }

    fn is_sorted_ascending(pop: &Population) -> bool {
        pop.chromosomes()
            .windows(2)
            .all(|w| w[0].fitness() <= w[1].fitness())
    }

    #[test]
    fn test_single_generation_example() {
        let config = EvolverConfig::default()
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0)
            .with_elitism(Elitism::Apply(1))
            .with_crossover(Crossover::Uniform)
            .with_selection(Selection::Rank);
        let mut evolver = Evolver::with_seed(sum_problem(), config, 42);
        let mut pop = fixed_population();

        let report = evolver.evolve(&mut pop).unwrap();

        assert_eq!(pop.len(), 5);
        assert_eq!(pop.chromosome_length(), 2);
        assert_eq!(pop.generation(), 2);
        assert_eq!(report.generations, 1);
        assert_eq!(report.history.len(), 2);
        assert!(pop.iter().any(|c| c.genes() == [5.0, 5.0]));
        // nothing can beat the elite: every gene comes from a parent
        assert_eq!(report.best_fitness, 10.0);
        assert!(is_sorted_ascending(&pop));
    }

    #[test]
    fn test_fitness_reflects_new_generation() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 7);
        let mut pop = fixed_population();
        evolver.evolve(&mut pop).unwrap();
        for c in pop.iter() {
            assert_eq!(c.fitness(), sum_fitness(c));
        }
    }

    #[test]
    fn test_elites_carried_over_unchanged() {
        let config = EvolverConfig::default()
            .with_elitism(Elitism::Apply(2))
            .with_mutation_rate(1.0);
        let problem = FnProblem::new(sum_fitness, |c: &Chromosome, i| c[i] - 100.0);
        let mut evolver = Evolver::with_seed(problem, config, 3);
        let mut pop = fixed_population();

        evolver.evolve(&mut pop).unwrap();

        // every non-elite gene was pushed far below zero
        let top: Vec<&[f64]> = pop.chromosomes()[3..].iter().map(|c| c.genes()).collect();
        assert_eq!(top, vec![&[3.0, 3.0][..], &[5.0, 5.0][..]]);
        for c in &pop.chromosomes()[..3] {
            assert!(c.genes().iter().all(|&g| g < -90.0));
        }
    }

    #[test]
    fn test_full_elitism_keeps_population() {
        let config = EvolverConfig::default().with_elitism(Elitism::Apply(5));
        let mut evolver = Evolver::with_seed(sum_problem(), config, 1);
        let mut pop = fixed_population();
        evolver.evolve(&mut pop).unwrap();
        let fitness: Vec<f64> = pop.iter().map(Chromosome::fitness).collect();
        assert_eq!(fitness, vec![1.0, 3.0, 4.0, 6.0, 10.0]);
    }

    #[test]
    fn test_mutation_sees_whole_child_and_index() {
        let config = EvolverConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0);
        // gene i becomes its index plus the child's first gene
        let problem = FnProblem::new(sum_fitness, |c: &Chromosome, i| c[0] + i as f64);
        let mut evolver = Evolver::with_seed(problem, config, 5);
        let mut pop = Population::generate(4, 3, |_, _| 0.0);

        evolver.evolve(&mut pop).unwrap();

        for c in pop.iter() {
            // gene 0: 0 + 0; gene 1: 0 + 1; gene 2: 0 + 2
            assert_eq!(c.genes(), &[0.0, 1.0, 2.0]);
        }
    }

    #[test]
    fn test_no_crossover_no_mutation_copies_members() {
        let config = EvolverConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut evolver = Evolver::with_seed(sum_problem(), config, 9);
        let before = fixed_population();
        let mut pop = before.clone();
        evolver.evolve(&mut pop).unwrap();
        for c in pop.iter() {
            assert!(before.iter().any(|o| o.genes() == c.genes()));
        }
    }

    #[test]
    fn test_empty_population_fails_untouched() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 1);
        let mut pop = Population::default();
        assert_eq!(evolver.evolve(&mut pop).unwrap_err(), EvolveError::EmptyPopulation);
        assert!(pop.is_empty());
        assert_eq!(pop.generation(), 1);
    }

    #[test]
    fn test_invalid_point_count_before_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let problem = FnProblem::new(
            move |c: &Chromosome| {
                counter.fetch_add(1, Ordering::Relaxed);
                sum_fitness(c)
            },
            no_mutation,
        );
        let config = EvolverConfig::default().with_crossover(Crossover::Point(2));
        let mut evolver = Evolver::with_seed(problem, config, 1);
        let mut pop = fixed_population();

        let err = evolver.evolve(&mut pop).unwrap_err();

        assert_eq!(
            err,
            EvolveError::InvalidCrossoverPointCount {
                count: 2,
                chromosome_length: 2
            }
        );
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(pop.generation(), 1);
        assert_eq!(pop.chromosomes()[0].genes(), &[1.0, 2.0]);
    }

    #[test]
    fn test_mixed_lengths_rejected_before_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let problem = FnProblem::new(
            move |c: &Chromosome| {
                counter.fetch_add(1, Ordering::Relaxed);
                sum_fitness(c)
            },
            no_mutation,
        );
        let mut evolver = Evolver::with_seed(problem, EvolverConfig::default(), 1);
        let mut pop = Population::new(vec![
            Chromosome::new(vec![3.0, 3.0]),
            Chromosome::new(vec![1.0]),
            Chromosome::new(vec![2.0, 2.0]),
        ]);

        let err = evolver.evolve(&mut pop).unwrap_err();

        assert_eq!(
            err,
            EvolveError::MismatchedChromosomeLength {
                index: 1,
                length: 1,
                expected: 2
            }
        );
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(pop.chromosomes()[0].genes(), &[3.0, 3.0]);
        assert_eq!(pop.generation(), 1);
    }

    #[test]
    fn test_invalid_elitism_count() {
        let config = EvolverConfig::default().with_elitism(Elitism::Apply(6));
        let mut evolver = Evolver::with_seed(sum_problem(), config, 1);
        let mut pop = fixed_population();
        assert!(matches!(
            evolver.evolve(&mut pop),
            Err(EvolveError::InvalidElitismCount {
                count: 6,
                population_size: 5
            })
        ));
    }

    #[test]
    fn test_fitness_called_once_per_chromosome_per_generation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let problem = FnProblem::new(
            move |c: &Chromosome| {
                counter.fetch_add(1, Ordering::Relaxed);
                sum_fitness(c)
            },
            no_mutation,
        );
        let mut evolver = Evolver::with_seed(problem, EvolverConfig::default(), 1);
        let mut pop = fixed_population();
        evolver.evolve_generations(&mut pop, 3).unwrap();
        // initial pass plus one pass per bred generation
        assert_eq!(calls.load(Ordering::Relaxed), 5 * 4);
    }

    #[test]
    fn test_continuation_controls_loop() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 2);
        let mut pop = fixed_population();
        let mut seen = Vec::new();
        let report = evolver
            .evolve_with(&mut pop, |_, p| {
                seen.push(p.generation());
                p.generation() < 6
            })
            .unwrap();
        assert_eq!(seen, vec![2, 3, 4, 5, 6]);
        assert_eq!(report.generations, 5);
        assert_eq!(report.history.len(), 6);
        assert_eq!(pop.generation(), 6);
    }

    #[test]
    fn test_continuation_can_rewrite_config() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 2);
        let mut pop = fixed_population();
        evolver
            .evolve_with(&mut pop, |config, p| {
                config.mutation_rate = 0.5;
                config.selection = Selection::Tournament;
                p.generation() < 3
            })
            .unwrap();
        assert_eq!(evolver.config().selection, Selection::Tournament);
        assert!((evolver.config().mutation_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_continuation_invalid_config_stops_loop() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 2);
        let mut pop = fixed_population();
        let err = evolver
            .evolve_with(&mut pop, |config, _| {
                config.elitism = Elitism::Apply(99);
                true
            })
            .unwrap_err();
        assert!(matches!(err, EvolveError::InvalidElitismCount { count: 99, .. }));
        // the generation bred before the hook ran is kept
        assert_eq!(pop.generation(), 2);
    }

    #[test]
    fn test_evolve_generations_zero_only_evaluates() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 2);
        let mut pop = fixed_population();
        let report = evolver.evolve_generations(&mut pop, 0).unwrap();
        assert_eq!(report.generations, 0);
        assert_eq!(pop.generation(), 1);
        assert_eq!(report.best_fitness, 10.0);
        assert!(is_sorted_ascending(&pop));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let config = EvolverConfig::default()
                .with_selection(Selection::Tournament)
                .with_crossover(Crossover::Point(1))
                .with_mutation_rate(0.3);
            let problem = FnProblem::new(sum_fitness, |c: &Chromosome, i| c[i] + 0.5);
            let mut evolver = Evolver::with_seed(problem, config, 1234);
            let mut pop = fixed_population();
            evolver.evolve_generations(&mut pop, 5).unwrap();
            pop.into_chromosomes()
                .into_iter()
                .map(Chromosome::into_genes)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_negative_fitness_warning() {
        let problem = FnProblem::new(|c: &Chromosome| c[0] - 2.0, no_mutation);
        let mut evolver = Evolver::with_seed(
            problem,
            EvolverConfig::default().with_elitism(Elitism::Apply(5)),
            1,
        );
        let mut pop = fixed_population();
        let report = evolver.evolve(&mut pop).unwrap();
        // genes[0] = 1, 5, 0, 3, 2 -> two negatives, in both passes
        assert_eq!(
            report.warnings,
            vec![
                Warning::NegativeFitness {
                    generation: 1,
                    count: 2
                },
                Warning::NegativeFitness {
                    generation: 2,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_roulette_negative_weight_warning() {
        let problem = FnProblem::new(|c: &Chromosome| c[0], no_mutation);
        let config = EvolverConfig::default()
            .with_selection(Selection::Roulette)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut evolver = Evolver::with_seed(problem, config, 1);
        let mut pop = Population::new(vec![
            Chromosome::new(vec![-1.0]),
            Chromosome::new(vec![1.0]),
            Chromosome::new(vec![2.0]),
        ]);
        let report = evolver.evolve(&mut pop).unwrap();
        assert!(report.warnings.contains(&Warning::NegativeRouletteWeight {
            generation: 1,
            offset: 0.5
        }));
    }

    #[test]
    fn test_all_selection_strategies_improve() {
        for selection in [Selection::Rank, Selection::Roulette, Selection::Tournament] {
            let config = EvolverConfig::default()
                .with_selection(selection.clone())
                .with_elitism(Elitism::Apply(2))
                .with_mutation_rate(0.2);
            let problem = FnProblem::new(sum_fitness, |c: &Chromosome, i| c[i] + 1.0);
            let mut evolver = Evolver::with_seed(problem, config, 42);
            let mut pop = Population::generate(20, 5, |c, g| ((c * 7 + g * 3) % 5) as f64);
            let report = evolver.evolve_generations(&mut pop, 30).unwrap();
            let start = report.history[0].best;
            assert!(
                report.best_fitness > start,
                "{selection:?}: {} <= {start}",
                report.best_fitness
            );
        }
    }

    #[test]
    fn test_elitism_best_never_decreases() {
        let config = EvolverConfig::default()
            .with_elitism(Elitism::Apply(1))
            .with_crossover(Crossover::Point(2))
            .with_mutation_rate(0.5);
        let problem = FnProblem::new(
            |c: &Chromosome| -c.genes().iter().map(|x| x * x).sum::<f64>(),
            |c: &Chromosome, i| c[i] * 0.5,
        );
        let mut evolver = Evolver::with_seed(problem, config, 8);
        let mut pop = Population::generate(15, 4, |c, g| (c as f64) - (g as f64) * 2.0);
        let report = evolver.evolve_generations(&mut pop, 20).unwrap();
        for window in report.history.windows(2) {
            assert!(window[1].best >= window[0].best);
        }
    }

    #[test]
    fn test_custom_strategies_are_used() {
        let config = EvolverConfig::default()
            .with_crossover_rate(1.0)
            .with_mutation_rate(0.0)
            .with_selection(Selection::custom(
                |pop: &[Chromosome], _: &mut dyn RngCore| -> Chromosome {
                    pop.last().cloned().unwrap_or_default()
                },
            ))
            .with_crossover(Crossover::custom(
                |a: &Chromosome, b: &Chromosome, _: &mut dyn RngCore| -> Chromosome {
                    a.genes().iter().zip(b.genes()).map(|(x, y)| x + y).collect()
                },
            ));
        let mut evolver = Evolver::with_seed(sum_problem(), config, 1);
        let mut pop = fixed_population();
        evolver.evolve(&mut pop).unwrap();
        for c in pop.iter() {
            assert_eq!(c.genes(), &[10.0, 10.0]);
        }
    }

    #[test]
    fn test_degenerate_population_evolves() {
        let mut evolver = Evolver::with_seed(sum_problem(), EvolverConfig::default(), 1);
        let mut pop = Population::generate(0, 0, |_, _| 1.0);
        evolver.evolve(&mut pop).unwrap();
        assert_eq!(pop.len(), 1);
        assert!(pop.chromosomes()[0].is_empty());
        assert_eq!(pop.generation(), 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let run = |parallel: bool| {
            let config = EvolverConfig::default()
                .with_parallel(parallel)
                .with_elitism(Elitism::Apply(3));
            let problem = FnProblem::new(sum_fitness, |c: &Chromosome, i| c[i] - 0.5);
            let mut evolver = Evolver::with_seed(problem, config, 77);
            let mut pop = Population::generate(40, 6, |c, g| ((c + g) % 7) as f64);
            evolver.evolve_generations(&mut pop, 10).unwrap();
            pop.iter().map(|c| c.genes().to_vec()).collect::<Vec<_>>()
        };
        assert_eq!(run(true), run(false));
    }

    #[test]
    fn test_out_of_range_rates_behave_as_clamped() {
        let mut config = EvolverConfig::default();
        config.crossover_rate = -3.0;
        config.mutation_rate = 7.0;
        let problem = FnProblem::new(sum_fitness, |_: &Chromosome, _| 1.0);
        let mut evolver = Evolver::with_seed(problem, config, 4);
        let mut pop = fixed_population();
        evolver.evolve(&mut pop).unwrap();
        for c in pop.iter() {
            assert_eq!(c.genes(), &[1.0, 1.0]);
        }
    }
}
