//! Genetic operators over maintenance schedules.
//!
//! Every operator keeps each gene inside its unit's catalog: new genes are
//! only ever drawn from the catalog, and crossover re-checks membership
//! before handing children back.

use crate::domain::{MaintenanceProblem, Pattern, Schedule};
use rand::seq::index;
use rand::Rng;
use std::cmp::Reverse;

/// A schedule with one uniformly drawn pattern per unit.
pub fn random_schedule<R: Rng + ?Sized>(problem: &MaintenanceProblem, rng: &mut R) -> Schedule {
    Schedule::new((0..problem.unit_count()).map(|unit| problem.draw(unit, rng)).collect())
}

/// Tournament selection without replacement.
///
/// Draws `size` distinct members (capped at the population size) and returns
/// the fittest. Among equally fit contestants the first one drawn wins.
/// Returns `None` for an empty population.
pub fn tournament_select<'a, T, R, F>(population: &'a [T], size: usize, rng: &mut R, fitness: F) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> i64,
{
    if population.is_empty() {
        return None;
    }
    let size = size.clamp(1, population.len());

    index::sample(rng, population.len(), size)
        .into_iter()
        .min_by_key(|&i| Reverse(fitness(&population[i])))
        .map(|winner| &population[winner])
}

/// Uniform crossover: every unit flips its own coin to decide which parent
/// feeds which child. Children always cover every unit of `problem`; a unit
/// missing from a short parent gets a fresh draw from its catalog.
pub fn uniform_crossover<R: Rng + ?Sized>(
    problem: &MaintenanceProblem,
    parent_1: &Schedule,
    parent_2: &Schedule,
    rng: &mut R,
) -> (Schedule, Schedule) {
    let mut genes_1 = Vec::with_capacity(problem.unit_count());
    let mut genes_2 = Vec::with_capacity(problem.unit_count());

    for unit in 0..problem.unit_count() {
        let (gene_1, gene_2) = if rng.gen_bool(0.5) {
            (parent_1.gene(unit), parent_2.gene(unit))
        } else {
            (parent_2.gene(unit), parent_1.gene(unit))
        };

        genes_1.push(inherit(problem, unit, gene_1, rng));
        genes_2.push(inherit(problem, unit, gene_2, rng));
    }

    (Schedule::new(genes_1), Schedule::new(genes_2))
}

fn inherit<R: Rng + ?Sized>(problem: &MaintenanceProblem, unit: usize, gene: Option<&Pattern>, rng: &mut R) -> Pattern {
    match gene {
        Some(gene) => repair(problem, unit, gene, rng),
        None => problem.draw(unit, rng),
    }
}

/// Keeps `gene` if the unit's catalog holds it, otherwise draws a legal one.
pub fn repair<R: Rng + ?Sized>(problem: &MaintenanceProblem, unit: usize, gene: &Pattern, rng: &mut R) -> Pattern {
    if problem.catalog(unit).contains(gene) {
        gene.clone()
    } else {
        log::debug!("unit {} inherited illegal pattern {}, redrawing", unit, gene);
        problem.draw(unit, rng)
    }
}

/// Replaces the gene of one uniformly chosen unit with a fresh draw from its
/// catalog. The draw may equal the old gene. Units the schedule does not
/// hold are never picked, and an empty schedule is left alone.
pub fn point_mutation<R: Rng + ?Sized>(problem: &MaintenanceProblem, schedule: &mut Schedule, rng: &mut R) {
    let units = schedule.len().min(problem.unit_count());
    if units == 0 {
        return;
    }

    let unit = rng.gen_range(0..units);
    schedule.set_gene(unit, problem.draw(unit, rng));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_genes_legal(problem: &MaintenanceProblem, schedule: &Schedule) -> bool {
        schedule
            .genes()
            .iter()
            .enumerate()
            .all(|(unit, gene)| problem.catalog(unit).contains(gene))
    }

    #[test]
    fn test_random_schedule_is_legal() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let schedule = random_schedule(&problem, &mut rng);
            assert_eq!(schedule.len(), problem.unit_count());
            assert!(all_genes_legal(&problem, &schedule));
        }
    }

    #[test]
    fn test_crossover_children_take_genes_from_parents() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = random_schedule(&problem, &mut rng);
        let p2 = random_schedule(&problem, &mut rng);

        for _ in 0..50 {
            let (c1, c2) = uniform_crossover(&problem, &p1, &p2, &mut rng);
            assert!(all_genes_legal(&problem, &c1));
            assert!(all_genes_legal(&problem, &c2));

            for unit in 0..problem.unit_count() {
                let pair = (c1.gene(unit), c2.gene(unit));
                assert!(
                    pair == (p1.gene(unit), p2.gene(unit)) || pair == (p2.gene(unit), p1.gene(unit)),
                    "unit {} was not inherited as a complementary pair",
                    unit
                );
            }
        }
    }

    #[test]
    fn test_crossover_mixes_parents() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let p1 = Schedule::new((0..7).map(|unit| problem.catalog(unit).patterns()[0].clone()).collect());
        let p2 = Schedule::new((0..7).map(|unit| problem.catalog(unit).patterns()[1].clone()).collect());

        let mixed = (0..20).any(|_| {
            let (c1, _) = uniform_crossover(&problem, &p1, &p2, &mut rng);
            c1 != p1 && c1 != p2
        });
        assert!(mixed, "uniform crossover should mix genes from both parents");
    }

    #[test]
    fn test_crossover_repairs_illegal_genes() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let illegal = Schedule::new(vec![Pattern::from_bits(&[1, 0, 1, 0]).unwrap(); 7]);

        let (c1, c2) = uniform_crossover(&problem, &illegal, &illegal, &mut rng);
        assert!(all_genes_legal(&problem, &c1));
        assert!(all_genes_legal(&problem, &c2));
    }

    #[test]
    fn test_mutation_changes_at_most_one_unit() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let original = random_schedule(&problem, &mut rng);
            let mut mutated = original.clone();
            point_mutation(&problem, &mut mutated, &mut rng);

            let changed = (0..problem.unit_count())
                .filter(|&unit| original.gene(unit) != mutated.gene(unit))
                .count();
            assert!(changed <= 1);
            assert!(all_genes_legal(&problem, &mutated));
        }
    }

    #[test]
    fn test_crossover_fills_units_missing_from_short_parent() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let full = random_schedule(&problem, &mut rng);
        let short = Schedule::new(full.genes()[..3].to_vec());

        for _ in 0..20 {
            let (c1, c2) = uniform_crossover(&problem, &full, &short, &mut rng);
            assert_eq!(c1.len(), problem.unit_count());
            assert_eq!(c2.len(), problem.unit_count());
            assert!(all_genes_legal(&problem, &c1));
            assert!(all_genes_legal(&problem, &c2));
        }

        let (c1, c2) = uniform_crossover(&problem, &Schedule::default(), &Schedule::default(), &mut rng);
        assert!(all_genes_legal(&problem, &c1) && c1.len() == 7);
        assert!(all_genes_legal(&problem, &c2) && c2.len() == 7);
    }

    #[test]
    fn test_mutation_leaves_empty_schedule_alone() {
        let problem = demo_data::reference_problem().unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let mut schedule = Schedule::default();

        point_mutation(&problem, &mut schedule, &mut rng);
        assert!(schedule.is_empty());

        let mut short = Schedule::new(vec![problem.catalog(0).patterns()[0].clone()]);
        for _ in 0..10 {
            point_mutation(&problem, &mut short, &mut rng);
            assert_eq!(short.len(), 1);
            assert!(problem.catalog(0).contains(&short.genes()[0]));
        }
    }

    #[test]
    fn test_tournament_returns_sampled_best() {
        let mut rng = StdRng::seed_from_u64(1);
        let population: Vec<i64> = vec![12, 3, 40, 7, 25, 18, 1, 33, 9, 21];

        for _ in 0..100 {
            let mut replay = rng.clone();
            let sampled_best = index::sample(&mut replay, population.len(), 3)
                .into_iter()
                .map(|i| population[i])
                .max()
                .unwrap();

            let winner = *tournament_select(&population, 3, &mut rng, |&f| f).unwrap();
            assert_eq!(winner, sampled_best);
        }
    }

    #[test]
    fn test_tournament_covers_whole_population() {
        let mut rng = StdRng::seed_from_u64(9);
        let population = vec![4_i64, 8, 15];

        for _ in 0..20 {
            assert_eq!(tournament_select(&population, 3, &mut rng, |&f| f), Some(&15));
        }
    }

    #[test]
    fn test_tournament_on_empty_population() {
        let mut rng = StdRng::seed_from_u64(4);
        let population: Vec<i64> = Vec::new();
        assert_eq!(tournament_select(&population, 3, &mut rng, |&f| f), None);
    }
}
