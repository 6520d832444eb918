use crate::domain::{Catalog, MaintenanceProblem};
use crate::error::ModelError;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Demo fleet of `maintenance-scheduling.py`, where unit seven is rated 10 MW.
pub const UNIT_CAPACITIES: [i64; 7] = [20, 15, 35, 40, 15, 15, 10];
pub const TOTAL_CAPACITY: i64 = 150;
pub const PEAK_LOADS: [i64; 4] = [80, 90, 65, 70];

/// Seven-unit fleet over four intervals. The first two units need two
/// consecutive intervals of maintenance, the rest need exactly one.
pub fn reference_problem() -> Result<MaintenanceProblem, ModelError> {
    let intervals = PEAK_LOADS.len();
    let catalogs = (0..UNIT_CAPACITIES.len())
        .map(|unit| {
            if unit < 2 {
                Catalog::contiguous(intervals, 2)
            } else {
                Catalog::contiguous(intervals, 1)
            }
        })
        .collect();

    MaintenanceProblem::new(&UNIT_CAPACITIES, TOTAL_CAPACITY, &PEAK_LOADS, catalogs)
}

/// Random fleet for sweeps. Capacities are drawn around `mean_capacity`,
/// every unit needs a contiguous outage of one to `max_outage` intervals,
/// and peak loads leave room for roughly one unit in maintenance at a time.
pub fn synthetic_problem<R: Rng + ?Sized>(
    units: usize,
    intervals: usize,
    max_outage: usize,
    rng: &mut R,
) -> Result<MaintenanceProblem, ModelError> {
    let mean_capacity: f64 = 25.0;
    let capacity_distribution = Normal::new(mean_capacity, mean_capacity / 3.0)?;

    let capacities: Vec<i64> = (0..units)
        .map(|_| capacity_distribution.sample(rng).round().max(1.0) as i64)
        .collect();
    let total_capacity: i64 = capacities.iter().sum();

    let largest = capacities.iter().copied().max().unwrap_or(0);
    let load_ceiling = (total_capacity - largest).max(1) as f64;
    let load_distribution = Normal::new(load_ceiling * 0.8, load_ceiling * 0.05)?;

    let peak_loads: Vec<i64> = (0..intervals)
        .map(|_| load_distribution.sample(rng).clamp(1.0, load_ceiling).round() as i64)
        .collect();

    let catalogs = (0..units)
        .map(|_| Catalog::contiguous(intervals, rng.gen_range(1..=max_outage.clamp(1, intervals.max(1)))))
        .collect();

    MaintenanceProblem::new(&capacities, total_capacity, &peak_loads, catalogs)
}
