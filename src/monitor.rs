use crate::domain::MaintenanceProblem;
use crate::fitness;
use crate::genetic_algorithm::{Chromosome, Monitor};
use crate::genetic_optimizer::Individual;
use colored::Colorize;

/// Prints one progress line per generation.
#[derive(Debug)]
pub struct ConsoleMonitor<'a> {
    problem: &'a MaintenanceProblem,
}

impl<'a> ConsoleMonitor<'a> {
    pub fn new(problem: &'a MaintenanceProblem) -> Self {
        Self { problem }
    }
}

impl Monitor<Individual> for ConsoleMonitor<'_> {
    fn on_generation(&mut self, generation: usize, population: &[Individual]) {
        if let Some(best) = population.first() {
            let feasible = population
                .iter()
                .filter(|individual| fitness::is_feasible(self.problem, individual.schedule()))
                .count();

            println!(
                "{}: Best fitness = {} (feasible: {}/{})",
                format!("Generation {}", generation).bold().red(),
                best.fitness(),
                feasible,
                population.len(),
            );
        }
    }
}

/// Keeps the best fitness and population size of every generation.
#[derive(Debug, Default)]
pub struct HistoryMonitor {
    pub best: Vec<i64>,
    pub sizes: Vec<usize>,
}

impl<C: Chromosome> Monitor<C> for HistoryMonitor {
    fn on_generation(&mut self, _generation: usize, population: &[C]) {
        self.best.push(population.iter().map(C::fitness).max().unwrap_or(i64::MIN));
        self.sizes.push(population.len());
    }
}

#[derive(Debug, Default)]
pub struct NoopMonitor;

impl<C: Chromosome> Monitor<C> for NoopMonitor {
    fn on_generation(&mut self, _generation: usize, _population: &[C]) {}
}
