use anyhow::Context;
use maintenance_ga::benchmark::{collect_benchmarks, BenchmarkSchema};
use maintenance_ga::demo_data;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

const REPETITIONS: usize = 5;
const BASE_SEED: u64 = 1;

fn run() -> anyhow::Result<()> {
    let schemas = vec![
        BenchmarkSchema {
            population_sizes: vec![10, 20, 40],
            generations: vec![50, 100],
            elitism: vec![0],
            mutation_rates: vec![1.0],
        },
        BenchmarkSchema {
            population_sizes: vec![20],
            generations: vec![100],
            elitism: vec![0, 1, 2],
            mutation_rates: vec![0.5, 1.0],
        },
    ];

    let reference = demo_data::reference_problem().context("reference fleet is malformed")?;
    let mut rng = StdRng::seed_from_u64(BASE_SEED);
    let synthetic = demo_data::synthetic_problem(30, 12, 3, &mut rng).context("synthetic fleet is malformed")?;

    let problems = [("reference", &reference), ("synthetic-30x12", &synthetic)];
    let rows = collect_benchmarks(&problems, &schemas, REPETITIONS, BASE_SEED, io::stdout().lock())?;
    log::info!("wrote {} benchmark rows", rows);

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
