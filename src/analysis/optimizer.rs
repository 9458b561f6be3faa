//! Genetic search over a box of parameters
//!
//! Maximizes a caller-supplied fitness over [`SearchDimension`]s. One
//! generation:
//!
//! ```text
//! evaluate ──► sort descending ──► update best-so-far ──► report / callback
//!                                                              │
//!        ┌─────────────────────────────────────────────────────┘
//!        ▼
//! elites (top 2) + [tournament(2) ×2 ─► blend crossover ─► mutation]*
//! ```
//!
//! All random draws happen on the calling thread, so a seeded run is
//! reproducible with or without the `parallel` feature. Only fitness
//! evaluation fans out.
//!
//! The callback is the suspension point between generations: returning
//! [`ControlFlow::Break`] stops the search after the current generation.

use std::ops::ControlFlow;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analysis::quick_solve;
use crate::physics::{Parameter, ParameterSet};

// =================================================================================================
// Configuration
// =================================================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("No search dimension declared")]
    NoDimensions,

    #[error("Invalid bounds for {parameter}: [{min}, {max}]")]
    InvalidBounds { parameter: Parameter, min: f64, max: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// One searched parameter and its closed bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchDimension {
    pub parameter: Parameter,
    pub min: f64,
    pub max: f64,
}

impl SearchDimension {
    pub fn new(parameter: Parameter, min: f64, max: f64) -> Self {
        Self { parameter, min, max }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Hyper-parameters of the genetic search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Per-gene mutation probability
    pub mutation_rate: f64,
    /// Maximum mutation step as a fraction of the dimension range
    pub mutation_scale: f64,
    /// Individuals copied unchanged into the next generation
    pub elite_count: usize,
    /// Seed of the internal generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 30,
            mutation_rate: 0.15,
            mutation_scale: 0.2,
            elite_count: 2,
            seed: None,
        }
    }
}

impl GeneticConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }

    pub fn with_population(self, population_size: usize) -> Self {
        Self { population_size, ..self }
    }

    pub fn with_generations(self, generations: usize) -> Self {
        Self { generations, ..self }
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.population_size == 0 {
            return Err(OptimizerError::InvalidConfig("population_size must be ≥ 1".into()));
        }
        if self.generations == 0 {
            return Err(OptimizerError::InvalidConfig("generations must be ≥ 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(OptimizerError::InvalidConfig(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !self.mutation_scale.is_finite() || self.mutation_scale < 0.0 {
            return Err(OptimizerError::InvalidConfig(format!(
                "mutation_scale must be ≥ 0, got {}",
                self.mutation_scale
            )));
        }
        if self.elite_count > self.population_size {
            return Err(OptimizerError::InvalidConfig(format!(
                "elite_count ({}) exceeds population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Records
// =================================================================================================

/// A point of the search box and its fitness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genes: Vec<f64>,
    /// −∞ until evaluated, and for failed or NaN evaluations
    pub fitness: f64,
}

/// Progress after one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Zero-based
    pub generation: usize,
    pub best_fitness: f64,
    /// Best individual so far, over all generations
    pub best: Individual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub best: Individual,
    /// One report per completed generation
    pub history: Vec<GenerationReport>,
    /// `true` when the callback stopped the search early
    pub cancelled: bool,
}

// =================================================================================================
// Optimizer
// =================================================================================================

/// Genetic maximizer over a fixed set of dimensions
#[derive(Debug, Clone)]
pub struct GeneticOptimizer {
    dimensions: Vec<SearchDimension>,
    config: GeneticConfig,
}

impl GeneticOptimizer {
    /// # Errors
    ///
    /// [`OptimizerError`] for an empty dimension list, non-finite or
    /// inverted bounds, or an inconsistent configuration.
    pub fn new(dimensions: Vec<SearchDimension>, config: GeneticConfig) -> Result<Self, OptimizerError> {
        if dimensions.is_empty() {
            return Err(OptimizerError::NoDimensions);
        }
        for d in &dimensions {
            if !d.min.is_finite() || !d.max.is_finite() || d.min > d.max {
                return Err(OptimizerError::InvalidBounds { parameter: d.parameter, min: d.min, max: d.max });
            }
        }
        config.validate()?;
        Ok(Self { dimensions, config })
    }

    pub fn dimensions(&self) -> &[SearchDimension] {
        &self.dimensions
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Run with the configured seed, or an entropy-seeded generator
    pub fn run<F, C>(&self, fitness: F, callback: C) -> OptimizationOutcome
    where
        F: Fn(&[f64]) -> f64 + Sync,
        C: FnMut(&GenerationReport) -> ControlFlow<()>,
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng, fitness, callback)
    }

    /// Run with an injected random source
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use nanocouette::analysis::optimizer::{GeneticConfig, GeneticOptimizer, SearchDimension};
    /// use nanocouette::physics::Parameter;
    ///
    /// let optimizer = GeneticOptimizer::new(
    ///     vec![SearchDimension::new(Parameter::Hartmann, 0.0, 4.0)],
    ///     GeneticConfig::default(),
    /// )?;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let outcome = optimizer.run_with_rng(&mut rng, |g| -(g[0] - 1.5).powi(2), |_| ControlFlow::Continue(()));
    ///
    /// assert!((outcome.best.genes[0] - 1.5).abs() < 0.2);
    /// # Ok::<(), nanocouette::analysis::optimizer::OptimizerError>(())
    /// ```
    pub fn run_with_rng<R, F, C>(&self, rng: &mut R, fitness: F, mut callback: C) -> OptimizationOutcome
    where
        R: Rng,
        F: Fn(&[f64]) -> f64 + Sync,
        C: FnMut(&GenerationReport) -> ControlFlow<()>,
    {
        let mut population: Vec<Individual> = (0..self.config.population_size)
            .map(|_| self.random_individual(rng))
            .collect();

        let mut best = population[0].clone();
        let mut history = Vec::with_capacity(self.config.generations);
        let mut cancelled = false;

        for generation in 0..self.config.generations {
            evaluate(&mut population, &fitness);
            population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

            if population[0].fitness > best.fitness || history.is_empty() {
                best = population[0].clone();
            }

            let report = GenerationReport { generation, best_fitness: best.fitness, best: best.clone() };
            info!(
                "Generation {}/{}: best fitness {:.6e}",
                generation + 1,
                self.config.generations,
                report.best_fitness
            );
            let flow = callback(&report);
            history.push(report);

            if flow.is_break() {
                debug!("Search cancelled after generation {}", generation + 1);
                cancelled = true;
                break;
            }
            if generation + 1 < self.config.generations {
                population = self.breed(&population, rng);
            }
        }

        OptimizationOutcome { best, history, cancelled }
    }

    fn random_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        let genes = self
            .dimensions
            .iter()
            .map(|d| rng.gen_range(d.min..=d.max))
            .collect();
        Individual { genes, fitness: f64::NEG_INFINITY }
    }

    /// Next generation from a population sorted by descending fitness
    fn breed<R: Rng>(&self, sorted: &[Individual], rng: &mut R) -> Vec<Individual> {
        let size = self.config.population_size;
        let mut next: Vec<Individual> = sorted.iter().take(self.config.elite_count).cloned().collect();

        while next.len() < size {
            let first = tournament(sorted, rng);
            let second = tournament(sorted, rng);
            let mut child = self.crossover(first, second, rng);
            self.mutate(&mut child, rng);
            next.push(child);
        }
        next
    }

    fn crossover<R: Rng>(&self, first: &Individual, second: &Individual, rng: &mut R) -> Individual {
        let genes = first
            .genes
            .iter()
            .zip(&second.genes)
            .map(|(&a, &b)| {
                let alpha: f64 = rng.r#gen();
                alpha * a + (1.0 - alpha) * b
            })
            .collect();
        Individual { genes, fitness: f64::NEG_INFINITY }
    }

    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R) {
        for (gene, dim) in individual.genes.iter_mut().zip(&self.dimensions) {
            if rng.r#gen::<f64>() < self.config.mutation_rate {
                let step = rng.gen_range(-1.0..=1.0) * self.config.mutation_scale * dim.range();
                *gene = dim.clamp(*gene + step);
            }
        }
    }
}

/// Fitter of two uniform draws
fn tournament<'a, R: Rng>(population: &'a [Individual], rng: &mut R) -> &'a Individual {
    let a = &population[rng.gen_range(0..population.len())];
    let b = &population[rng.gen_range(0..population.len())];
    if a.fitness >= b.fitness { a } else { b }
}

fn evaluate<F>(population: &mut [Individual], fitness: &F)
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let score = |genes: &[f64]| {
        let f = fitness(genes);
        if f.is_nan() { f64::NEG_INFINITY } else { f }
    };

    #[cfg(feature = "parallel")]
    population.par_iter_mut().for_each(|ind| ind.fitness = score(&ind.genes));

    #[cfg(not(feature = "parallel"))]
    population.iter_mut().for_each(|ind| ind.fitness = score(&ind.genes));
}

// =================================================================================================
// Solver-backed fitness
// =================================================================================================

/// What a solver-backed fitness rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    MinimizeSettlingTime,
    MaximizeNusselt,
    MinimizeEntropy,
    MinimizeOvershoot,
}

/// Apply genes to a base parameter set, dimension by dimension
pub fn decode(base: &ParameterSet, dimensions: &[SearchDimension], genes: &[f64]) -> ParameterSet {
    dimensions
        .iter()
        .zip(genes)
        .fold(*base, |params, (d, &value)| params.with(d.parameter, value))
}

/// Fitness that runs a quick solve of the decoded parameter set
///
/// A solve that fails (for instance Pr driven to 0) scores −∞.
pub fn solver_fitness(
    base: ParameterSet,
    dimensions: Vec<SearchDimension>,
    objective: Objective,
) -> impl Fn(&[f64]) -> f64 + Sync + Send {
    move |genes: &[f64]| {
        let params = decode(&base, &dimensions, genes);
        match quick_solve(&params) {
            Ok(m) => match objective {
                Objective::MinimizeSettlingTime => -m.settling_time,
                Objective::MaximizeNusselt => m.nu_final,
                Objective::MinimizeEntropy => -m.average_entropy,
                Objective::MinimizeOvershoot => -m.overshoot,
            },
            Err(e) => {
                debug!("Fitness solve failed: {}", e);
                f64::NEG_INFINITY
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
