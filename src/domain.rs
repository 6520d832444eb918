use crate::error::ModelError;
use rand::prelude::*;
use serde::Serialize;
use std::fmt;

/// Per-interval maintenance indicator for one unit: `true` means the unit is
/// down for maintenance in that interval.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern(Vec<bool>);

impl Pattern {
    pub fn new(slots: Vec<bool>) -> Self {
        Pattern(slots)
    }

    /// Builds a pattern from 0/1 values.
    pub fn from_bits(bits: &[u8]) -> Result<Self, ModelError> {
        bits.iter()
            .map(|&bit| match bit {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(ModelError::NonBinaryValue(other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Pattern)
    }

    /// All-zero pattern: the unit stays active over the whole horizon.
    pub fn idle(intervals: usize) -> Self {
        Pattern(vec![false; intervals])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn in_maintenance(&self, interval: usize) -> bool {
        self.0.get(interval).copied().unwrap_or(false)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, &slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot as u8)?;
        }
        write!(f, "]")
    }
}

/// The legal maintenance patterns of a single unit (its gene pool).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    patterns: Vec<Pattern>,
}

impl Catalog {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Catalog { patterns }
    }

    pub fn from_bits(rows: &[&[u8]]) -> Result<Self, ModelError> {
        rows.iter()
            .map(|row| Pattern::from_bits(row))
            .collect::<Result<Vec<_>, _>>()
            .map(Catalog::new)
    }

    /// Every window of `length` consecutive intervals inside the horizon.
    pub fn contiguous(intervals: usize, length: usize) -> Self {
        let patterns = if length == 0 || length > intervals {
            Vec::new()
        } else {
            (0..=intervals - length)
                .map(|start| Pattern((0..intervals).map(|i| i >= start && i < start + length).collect()))
                .collect()
        };

        Catalog { patterns }
    }

    /// Membership by value equality.
    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.patterns.iter().any(|legal| legal == pattern)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One candidate maintenance plan: a pattern per unit, in unit order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Schedule {
    genes: Vec<Pattern>,
}

impl Schedule {
    pub fn new(genes: Vec<Pattern>) -> Self {
        Schedule { genes }
    }

    pub fn genes(&self) -> &[Pattern] {
        &self.genes
    }

    pub fn gene(&self, unit: usize) -> Option<&Pattern> {
        self.genes.get(unit)
    }

    /// Replaces the gene of `unit`. Returns `false` and leaves the schedule
    /// untouched if the schedule has no such unit.
    pub fn set_gene(&mut self, unit: usize, pattern: Pattern) -> bool {
        match self.genes.get_mut(unit) {
            Some(gene) => {
                *gene = pattern;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, gene) in self.genes.iter().enumerate() {
            writeln!(f, "unit {:2}: {}", unit + 1, gene)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub capacity: i64,
}

/// Static facts of one planning problem. Read-only once built.
#[derive(Clone, Debug)]
pub struct MaintenanceProblem {
    units: Vec<Unit>,
    total_capacity: i64,
    peak_loads: Vec<i64>,
    catalogs: Vec<Catalog>,
}

impl MaintenanceProblem {
    /// Validates the fleet eagerly; a malformed model never reaches the search.
    pub fn new(
        capacities: &[i64],
        total_capacity: i64,
        peak_loads: &[i64],
        catalogs: Vec<Catalog>,
    ) -> Result<Self, ModelError> {
        if capacities.is_empty() {
            return Err(ModelError::NoUnits);
        }
        if peak_loads.is_empty() {
            return Err(ModelError::NoIntervals);
        }
        if total_capacity <= 0 {
            return Err(ModelError::NonPositiveTotalCapacity(total_capacity));
        }
        if let Some((unit, &capacity)) = capacities.iter().enumerate().find(|&(_, &c)| c <= 0) {
            return Err(ModelError::NonPositiveCapacity { unit, capacity });
        }
        if let Some((interval, &load)) = peak_loads.iter().enumerate().find(|&(_, &l)| l <= 0) {
            return Err(ModelError::NonPositivePeakLoad { interval, load });
        }
        if catalogs.len() != capacities.len() {
            return Err(ModelError::CatalogCountMismatch {
                units: capacities.len(),
                catalogs: catalogs.len(),
            });
        }

        for (unit, catalog) in catalogs.iter().enumerate() {
            if catalog.is_empty() {
                return Err(ModelError::EmptyCatalog { unit });
            }
            for (pattern, legal) in catalog.patterns().iter().enumerate() {
                if legal.len() != peak_loads.len() {
                    return Err(ModelError::PatternLength {
                        unit,
                        pattern,
                        expected: peak_loads.len(),
                        actual: legal.len(),
                    });
                }
            }
        }

        let units = capacities.iter().map(|&capacity| Unit { capacity }).collect();

        Ok(MaintenanceProblem {
            units,
            total_capacity,
            peak_loads: peak_loads.to_vec(),
            catalogs,
        })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn interval_count(&self) -> usize {
        self.peak_loads.len()
    }

    pub fn total_capacity(&self) -> i64 {
        self.total_capacity
    }

    pub fn peak_loads(&self) -> &[i64] {
        &self.peak_loads
    }

    pub fn catalog(&self, unit: usize) -> &Catalog {
        &self.catalogs[unit]
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    /// Uniform draw from the catalog of `unit`. Catalogs are checked to be
    /// non-empty in [`MaintenanceProblem::new`].
    pub fn draw<R: Rng + ?Sized>(&self, unit: usize, rng: &mut R) -> Pattern {
        let patterns = self.catalogs[unit].patterns();
        patterns[rng.gen_range(0..patterns.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_interval_catalogs(units: usize) -> Vec<Catalog> {
        (0..units).map(|_| Catalog::contiguous(4, 1)).collect()
    }

    #[test]
    fn test_pattern_from_bits() {
        let pattern = Pattern::from_bits(&[1, 1, 0, 0]).unwrap();
        assert!(pattern.in_maintenance(0));
        assert!(pattern.in_maintenance(1));
        assert!(!pattern.in_maintenance(2));
        assert_eq!(pattern.to_string(), "[1, 1, 0, 0]");
    }

    #[test]
    fn test_pattern_rejects_non_binary() {
        assert_eq!(Pattern::from_bits(&[0, 2]), Err(ModelError::NonBinaryValue(2)));
    }

    #[test]
    fn test_contiguous_catalog() {
        let catalog = Catalog::contiguous(4, 2);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(&Pattern::from_bits(&[0, 1, 1, 0]).unwrap()));
        assert!(!catalog.contains(&Pattern::from_bits(&[1, 0, 0, 1]).unwrap()));
        assert!(Catalog::contiguous(3, 4).is_empty());
    }

    #[test]
    fn test_membership_is_by_value() {
        let catalog = Catalog::from_bits(&[&[1, 0, 0, 0], &[0, 1, 0, 0]]).unwrap();
        let fresh = Pattern::new(vec![false, true, false, false]);
        assert!(catalog.contains(&fresh));
    }

    #[test]
    fn test_schedule_gene_access_is_bounded() {
        let mut schedule = Schedule::new(vec![Pattern::idle(4); 2]);
        assert_eq!(schedule.gene(1), Some(&Pattern::idle(4)));
        assert_eq!(schedule.gene(2), None);

        let busy = Pattern::from_bits(&[1, 0, 0, 0]).unwrap();
        assert!(schedule.set_gene(0, busy.clone()));
        assert!(!schedule.set_gene(5, busy.clone()));
        assert_eq!(schedule.genes(), &[busy, Pattern::idle(4)]);
    }

    #[test]
    fn test_problem_accepts_valid_fleet() {
        let problem =
            MaintenanceProblem::new(&[20, 15], 150, &[80, 90, 65, 70], single_interval_catalogs(2))
                .unwrap();
        assert_eq!(problem.unit_count(), 2);
        assert_eq!(problem.interval_count(), 4);
        assert_eq!(problem.units()[1], Unit { capacity: 15 });
    }

    #[test]
    fn test_problem_rejects_empty_catalog() {
        let mut catalogs = single_interval_catalogs(2);
        catalogs[1] = Catalog::new(Vec::new());
        let err = MaintenanceProblem::new(&[20, 15], 150, &[80, 90, 65, 70], catalogs).unwrap_err();
        assert_eq!(err, ModelError::EmptyCatalog { unit: 1 });
    }

    #[test]
    fn test_problem_rejects_pattern_length_mismatch() {
        let catalogs = vec![
            Catalog::contiguous(4, 1),
            Catalog::from_bits(&[&[1, 0, 0]]).unwrap(),
        ];
        let err = MaintenanceProblem::new(&[20, 15], 150, &[80, 90, 65, 70], catalogs).unwrap_err();
        assert_eq!(
            err,
            ModelError::PatternLength {
                unit: 1,
                pattern: 0,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_problem_rejects_catalog_count_mismatch() {
        let err = MaintenanceProblem::new(&[20, 15, 35], 150, &[80, 90, 65, 70], single_interval_catalogs(2))
            .unwrap_err();
        assert_eq!(err, ModelError::CatalogCountMismatch { units: 3, catalogs: 2 });
    }

    #[test]
    fn test_problem_rejects_non_positive_inputs() {
        assert_eq!(
            MaintenanceProblem::new(&[20, 0], 150, &[80, 90, 65, 70], single_interval_catalogs(2))
                .unwrap_err(),
            ModelError::NonPositiveCapacity { unit: 1, capacity: 0 }
        );
        assert_eq!(
            MaintenanceProblem::new(&[20, 15], 0, &[80, 90, 65, 70], single_interval_catalogs(2))
                .unwrap_err(),
            ModelError::NonPositiveTotalCapacity(0)
        );
        assert_eq!(
            MaintenanceProblem::new(&[20, 15], 150, &[80, -1, 65, 70], single_interval_catalogs(2))
                .unwrap_err(),
            ModelError::NonPositivePeakLoad { interval: 1, load: -1 }
        );
        assert_eq!(
            MaintenanceProblem::new(&[], 150, &[80], Vec::new()).unwrap_err(),
            ModelError::NoUnits
        );
        assert_eq!(
            MaintenanceProblem::new(&[20], 150, &[], single_interval_catalogs(1)).unwrap_err(),
            ModelError::NoIntervals
        );
    }
}
