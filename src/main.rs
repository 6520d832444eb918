use anyhow::Context;
use maintenance_ga::demo_data;
use maintenance_ga::fitness;
use maintenance_ga::genetic_algorithm::{Chromosome, Optimizer};
use maintenance_ga::genetic_optimizer::{GeneticOptimizer, MaintenanceAlgorithm, SchedulingConfig};
use maintenance_ga::monitor::ConsoleMonitor;
use rand::rngs::StdRng;
use rand::SeedableRng;

const POPULATION_SIZE: usize = 20;
const GENERATIONS: usize = 100;

fn run() -> anyhow::Result<()> {
    let problem = demo_data::reference_problem().context("reference fleet is malformed")?;
    let config = SchedulingConfig::default()
        .with_population_size(POPULATION_SIZE)
        .with_generations(GENERATIONS);

    let algorithm =
        MaintenanceAlgorithm::new(problem.clone(), config).context("invalid run parameters")?;
    let mut optimizer = GeneticOptimizer::new(Box::new(algorithm));

    let seed: u64 = rand::random();
    log::info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut monitor = ConsoleMonitor::new(&problem);
    let outcome = optimizer.optimize(&mut monitor, &mut rng);
    let best = outcome.best;

    println!("Best solution found:");
    print!("{}", best.schedule());
    println!("Best fitness: {}", best.fitness());
    println!(
        "Net reserve per interval: {:?}",
        fitness::net_reserves(&problem, best.schedule())
    );

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
