use rand::RngCore;
use std::fmt::Debug;

// This trait represents a scored chromosome - a single candidate solution
// whose fitness is always in sync with its genome
pub trait Chromosome: Debug + Clone {
    type Genome: Debug + Clone;

    fn genome(&self) -> &Self::Genome;
    fn fitness(&self) -> i64;
}

// This trait represents the run parameters the driver needs
pub trait Meta: Debug {
    fn population_size(&self) -> usize;
    fn generations(&self) -> usize;
    fn elitism(&self) -> usize;
}

// This trait observes the population after every replacement step;
// it must never alter the search
pub trait Monitor<C: Chromosome> {
    fn on_generation(&mut self, generation: usize, population: &[C]);
}

// This trait encapsulates the problem-specific operators the driver
// orchestrates: construction, scoring, selection, crossover and mutation.
// Selection yields nothing only for an empty population
pub trait Algorithm<M: Meta, C: Chromosome>: Debug {
    fn meta(&self) -> &M;
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<C::Genome>;
    fn evaluate(&self, genomes: Vec<C::Genome>) -> Vec<C>;
    fn select<'a>(&self, population: &'a [C], rng: &mut dyn RngCore) -> Option<&'a C>;
    fn crossover(&self, parent_1: &C, parent_2: &C, rng: &mut dyn RngCore) -> (C::Genome, C::Genome);
    fn mutate(&self, genome: &mut C::Genome, rng: &mut dyn RngCore);
}

// This trait encapsulates the optimizer logic
pub trait Optimizer<C: Chromosome>: Debug {
    fn optimize(&mut self, monitor: &mut dyn Monitor<C>, rng: &mut dyn RngCore) -> SearchOutcome<C>;
}

/// What a finished search hands back.
#[derive(Debug, Clone)]
pub struct SearchOutcome<C: Chromosome> {
    pub best: C,
    pub generations: usize,
    pub population: Vec<C>,
}
