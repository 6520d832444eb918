use crate::domain::{MaintenanceProblem, Schedule};

/// Score the reference policy gives to any schedule that leaves an interval
/// short of its peak load.
pub const INFEASIBLE_SCORE: i64 = 0;

/// Capacity removed for maintenance in `interval`.
pub fn maintenance_capacity(problem: &MaintenanceProblem, schedule: &Schedule, interval: usize) -> i64 {
    problem
        .units()
        .iter()
        .zip(schedule.genes())
        .filter(|(_, gene)| gene.in_maintenance(interval))
        .map(|(unit, _)| unit.capacity)
        .sum()
}

/// Spare capacity per interval: what is left after maintenance, minus the
/// forecast peak load. Negative entries mark a shortfall.
pub fn net_reserves(problem: &MaintenanceProblem, schedule: &Schedule) -> Vec<i64> {
    problem
        .peak_loads()
        .iter()
        .enumerate()
        .map(|(interval, &load)| {
            let available = problem.total_capacity() - maintenance_capacity(problem, schedule, interval);
            available - load
        })
        .collect()
}

pub fn is_feasible(problem: &MaintenanceProblem, schedule: &Schedule) -> bool {
    net_reserves(problem, schedule).iter().all(|&reserve| reserve >= 0)
}

/// Maximin objective: the smallest net reserve across the horizon, or
/// `infeasible_score` as soon as any interval runs short.
pub fn evaluate(problem: &MaintenanceProblem, schedule: &Schedule, infeasible_score: i64) -> i64 {
    let mut worst = i64::MAX;

    for reserve in net_reserves(problem, schedule) {
        if reserve < 0 {
            return infeasible_score;
        }
        worst = worst.min(reserve);
    }

    worst
}
