use thiserror::Error;

/// Problems with the static fleet description. All of them are caught when
/// the [`MaintenanceProblem`](crate::domain::MaintenanceProblem) is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("the fleet has no units")]
    NoUnits,
    #[error("the planning horizon has no intervals")]
    NoIntervals,
    #[error("unit {unit} has non-positive capacity {capacity}")]
    NonPositiveCapacity { unit: usize, capacity: i64 },
    #[error("total system capacity must be positive, got {0}")]
    NonPositiveTotalCapacity(i64),
    #[error("interval {interval} has non-positive peak load {load}")]
    NonPositivePeakLoad { interval: usize, load: i64 },
    #[error("{catalogs} catalogs supplied for {units} units")]
    CatalogCountMismatch { units: usize, catalogs: usize },
    #[error("unit {unit} has an empty maintenance catalog")]
    EmptyCatalog { unit: usize },
    #[error("pattern {pattern} of unit {unit} has length {actual}, expected {expected}")]
    PatternLength {
        unit: usize,
        pattern: usize,
        expected: usize,
        actual: usize,
    },
    #[error("pattern value {0} is not binary")]
    NonBinaryValue(u8),
    #[error("invalid sampling distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),
}

/// Run parameters that cannot drive a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population size must be positive")]
    EmptyPopulation,
    #[error("tournament size must be positive")]
    EmptyTournament,
    #[error("population of {population} cannot host a tournament of {tournament}")]
    PopulationBelowTournament { population: usize, tournament: usize },
    #[error("elitism of {elitism} exceeds population size {population}")]
    ElitismAbovePopulation { elitism: usize, population: usize },
    #[error("mutation rate {0} is outside [0, 1]")]
    MutationRate(f64),
}
