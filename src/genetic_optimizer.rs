use crate::domain::{MaintenanceProblem, Schedule};
use crate::error::ConfigError;
use crate::fitness;
use crate::genetic_algorithm::{Algorithm, Chromosome, Meta, Monitor, Optimizer, SearchOutcome};
use crate::operators::{point_mutation, random_schedule, tournament_select, uniform_crossover};
use rand::prelude::*;
use std::cmp::Reverse;

#[derive(Clone, Debug, PartialEq)]
pub struct SchedulingConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub elitism: usize,
    pub infeasible_score: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 100,
            tournament_size: 3,
            mutation_rate: 1.0,
            elitism: 0,
            infeasible_score: fitness::INFEASIBLE_SCORE,
        }
    }
}

impl SchedulingConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    pub fn with_infeasible_score(mut self, infeasible_score: i64) -> Self {
        self.infeasible_score = infeasible_score;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        if self.population_size < self.tournament_size {
            return Err(ConfigError::PopulationBelowTournament {
                population: self.population_size,
                tournament: self.tournament_size,
            });
        }
        if self.elitism > self.population_size {
            return Err(ConfigError::ElitismAbovePopulation {
                elitism: self.elitism,
                population: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate(self.mutation_rate));
        }

        Ok(())
    }
}

impl Meta for SchedulingConfig {
    fn population_size(&self) -> usize {
        self.population_size
    }

    fn generations(&self) -> usize {
        self.generations
    }

    fn elitism(&self) -> usize {
        self.elitism
    }
}

/// A schedule together with its score. The only way to build one is to
/// score a schedule, and the schedule cannot be changed afterwards, so the
/// score never goes stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    schedule: Schedule,
    fitness: i64,
}

impl Individual {
    pub fn evaluate(problem: &MaintenanceProblem, schedule: Schedule, infeasible_score: i64) -> Self {
        let fitness = fitness::evaluate(problem, &schedule, infeasible_score);
        Individual { schedule, fitness }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

impl Chromosome for Individual {
    type Genome = Schedule;

    fn genome(&self) -> &Schedule {
        &self.schedule
    }

    fn fitness(&self) -> i64 {
        self.fitness
    }
}

#[derive(Debug)]
pub struct MaintenanceAlgorithm {
    problem: MaintenanceProblem,
    config: SchedulingConfig,
}

impl MaintenanceAlgorithm {
    pub fn new(problem: MaintenanceProblem, config: SchedulingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { problem, config })
    }
}

impl Algorithm<SchedulingConfig, Individual> for MaintenanceAlgorithm {
    fn meta(&self) -> &SchedulingConfig {
        &self.config
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Schedule> {
        (0..self.config.population_size)
            .map(|_| random_schedule(&self.problem, rng))
            .collect()
    }

    fn evaluate(&self, genomes: Vec<Schedule>) -> Vec<Individual> {
        genomes
            .into_iter()
            .map(|schedule| Individual::evaluate(&self.problem, schedule, self.config.infeasible_score))
            .collect()
    }

    fn select<'a>(&self, population: &'a [Individual], rng: &mut dyn RngCore) -> Option<&'a Individual> {
        tournament_select(population, self.config.tournament_size, rng, Individual::fitness)
    }

    fn crossover(&self, parent_1: &Individual, parent_2: &Individual, rng: &mut dyn RngCore) -> (Schedule, Schedule) {
        uniform_crossover(&self.problem, parent_1.genome(), parent_2.genome(), rng)
    }

    fn mutate(&self, genome: &mut Schedule, rng: &mut dyn RngCore) {
        if rng.gen_bool(self.config.mutation_rate) {
            point_mutation(&self.problem, genome, rng);
        }
    }
}

/// Generational driver: breed a full set of children from the current
/// population, score them, and keep the fittest `population_size` of them
/// (plus any elites carried over) as the next generation.
#[derive(Debug)]
pub struct GeneticOptimizer<M: Meta, C: Chromosome> {
    pub algorithm: Box<dyn Algorithm<M, C>>,
}

impl<M: Meta, C: Chromosome> GeneticOptimizer<M, C> {
    pub fn new(algorithm: Box<dyn Algorithm<M, C>>) -> Self {
        Self { algorithm }
    }

    fn breed(&self, population: &[C], rng: &mut dyn RngCore) -> Vec<C::Genome> {
        let target = self.algorithm.meta().population_size();
        let mut children = Vec::with_capacity(target + 1);

        // Children come in pairs; an odd target overshoots by one and the
        // extra child competes in the replacement step.
        while children.len() < target {
            let (Some(parent_1), Some(parent_2)) =
                (self.algorithm.select(population, rng), self.algorithm.select(population, rng))
            else {
                break;
            };

            let (mut child_1, mut child_2) = self.algorithm.crossover(parent_1, parent_2, rng);
            self.algorithm.mutate(&mut child_1, rng);
            self.algorithm.mutate(&mut child_2, rng);

            children.push(child_1);
            children.push(child_2);
        }

        children
    }
}

/// Stable sort, fittest first.
fn rank<C: Chromosome>(population: &mut [C]) {
    population.sort_by_key(|chromosome| Reverse(chromosome.fitness()));
}

impl<M: Meta, C: Chromosome> Optimizer<C> for GeneticOptimizer<M, C> {
    fn optimize(&mut self, monitor: &mut dyn Monitor<C>, rng: &mut dyn RngCore) -> SearchOutcome<C> {
        let meta = self.algorithm.meta();
        let (population_size, generations, elitism) = (meta.population_size(), meta.generations(), meta.elitism());

        log::info!(
            "starting search: population {}, generations {}, elitism {}",
            population_size,
            generations,
            elitism
        );

        let initial = self.algorithm.generate(rng);
        let mut population = self.algorithm.evaluate(initial);
        rank(&mut population);

        for generation in 1..=generations {
            let children = self.breed(&population, rng);

            let mut candidates = self.algorithm.evaluate(children);
            candidates.extend(population.drain(..elitism.min(population.len())));
            rank(&mut candidates);
            candidates.truncate(population_size);
            population = candidates;

            log::debug!(
                "generation {}: best {}, worst {}",
                generation,
                population[0].fitness(),
                population[population.len() - 1].fitness()
            );
            monitor.on_generation(generation, &population);
        }

        let best = population[0].clone();
        log::info!("search finished after {} generations, best fitness {}", generations, best.fitness());

        SearchOutcome {
            best,
            generations,
            population,
        }
    }
}
