use crate::domain::MaintenanceProblem;
use crate::fitness;
use crate::genetic_algorithm::{Chromosome, Optimizer};
use crate::genetic_optimizer::{GeneticOptimizer, MaintenanceAlgorithm, SchedulingConfig};
use crate::monitor::NoopMonitor;
use anyhow::Context;
use chrono::Local;
use csv::Writer;
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::iter::Sum;
use std::time::Instant;

/// A grid of run parameters; every combination is benchmarked.
#[derive(Debug, Clone)]
pub struct BenchmarkSchema {
    pub population_sizes: Vec<usize>,
    pub generations: Vec<usize>,
    pub elitism: Vec<usize>,
    pub mutation_rates: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct BenchmarkRow {
    pub problem: String,
    pub recorded_at: String,
    pub repetitions: usize,
    pub population_size: usize,
    pub generations: usize,
    pub elitism: usize,
    pub mutation_rate: f64,
    pub mean_fitness: f64,
    pub var_fitness: f64,
    pub mean_runtime: f64,
    pub var_runtime: f64,
    pub feasible_ratio: f64,
}

#[derive(Debug)]
struct RunResult {
    runtime: f64,
    fitness: i64,
    feasible: bool,
}

pub fn mean_variance<T: Copy + Into<f64> + Sum<T>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v.into()).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn benchmark_run(problem: &MaintenanceProblem, config: &SchedulingConfig, seed: u64) -> anyhow::Result<RunResult> {
    let algorithm = MaintenanceAlgorithm::new(problem.clone(), config.clone())?;
    let mut optimizer = GeneticOptimizer::new(Box::new(algorithm));
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    let outcome = optimizer.optimize(&mut NoopMonitor, &mut rng);
    let runtime = start.elapsed().as_secs_f64();

    Ok(RunResult {
        runtime,
        fitness: outcome.best.fitness(),
        feasible: fitness::is_feasible(problem, outcome.best.schedule()),
    })
}

/// Runs every combination of every schema `repetitions` times on every
/// problem, seeding repetition `i` with `base_seed + i`, and writes one CSV
/// row per problem and combination. Combinations already measured on a
/// problem are skipped.
pub fn collect_benchmarks<W: io::Write>(
    problems: &[(&str, &MaintenanceProblem)],
    schemas: &[BenchmarkSchema],
    repetitions: usize,
    base_seed: u64,
    output: W,
) -> anyhow::Result<usize> {
    let mut writer = Writer::from_writer(output);
    let mut rows = 0;

    for &(name, problem) in problems {
        rows += benchmark_problem(&mut writer, name, problem, schemas, repetitions, base_seed)?;
    }

    Ok(rows)
}

fn benchmark_problem<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    problem: &MaintenanceProblem,
    schemas: &[BenchmarkSchema],
    repetitions: usize,
    base_seed: u64,
) -> anyhow::Result<usize> {
    let mut visited: HashSet<(usize, usize, usize, u64)> = HashSet::new();
    let mut rows = 0;

    for schema in schemas {
        for (&population_size, &generations, &elitism, &mutation_rate) in iproduct!(
            &schema.population_sizes,
            &schema.generations,
            &schema.elitism,
            &schema.mutation_rates
        ) {
            if !visited.insert((population_size, generations, elitism, mutation_rate.to_bits())) {
                log::info!(
                    "{}: scenario population={} generations={} elitism={} mutation={} already evaluated, skipping",
                    name,
                    population_size,
                    generations,
                    elitism,
                    mutation_rate
                );
                continue;
            }

            let config = SchedulingConfig::default()
                .with_population_size(population_size)
                .with_generations(generations)
                .with_elitism(elitism)
                .with_mutation_rate(mutation_rate);

            let runs = (0..repetitions)
                .map(|i| benchmark_run(problem, &config, base_seed.wrapping_add(i as u64)))
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| format!("benchmarking {} with {:?}", name, config))?;

            let fitness_values: Vec<f64> = runs.iter().map(|r| r.fitness as f64).collect();
            let runtime_values: Vec<f64> = runs.iter().map(|r| r.runtime).collect();
            let feasible = runs.iter().filter(|r| r.feasible).count();

            let (mean_fitness, var_fitness) = mean_variance(&fitness_values);
            let (mean_runtime, var_runtime) = mean_variance(&runtime_values);

            writer.serialize(BenchmarkRow {
                problem: name.to_string(),
                recorded_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                repetitions,
                population_size,
                generations,
                elitism,
                mutation_rate,
                mean_fitness,
                var_fitness,
                mean_runtime,
                var_runtime,
                feasible_ratio: if repetitions == 0 { 0.0 } else { feasible as f64 / repetitions as f64 },
            })?;
            writer.flush()?;
            rows += 1;
        }
    }

    Ok(rows)
}
