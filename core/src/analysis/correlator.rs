//! Tower/observation matching and best-match selection.

use crate::model::{MatchGroup, Observation, Tower};
use std::collections::HashMap;

/// Observations grouped by cell id, each group in input order.
#[derive(Debug, Default)]
pub struct CellIndex<'a> {
    groups: HashMap<i64, Vec<&'a Observation>>,
}

impl<'a> CellIndex<'a> {
    pub fn build(observations: &'a [Observation]) -> Self {
        let mut groups: HashMap<i64, Vec<&'a Observation>> = HashMap::new();
        for observation in observations {
            groups.entry(observation.cell_id).or_default().push(observation);
        }
        Self { groups }
    }

    pub fn matches(&self, cell_id: i64) -> &[&'a Observation] {
        self.groups.get(&cell_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, cell_id: i64) -> usize {
        self.matches(cell_id).len()
    }
}

/// Number of observations sharing each tower's cell id, in tower order.
pub fn match_counts(towers: &[Tower], observations: &[Observation]) -> Vec<usize> {
    let index = CellIndex::build(observations);
    towers.iter().map(|tower| index.count(tower.cell_id)).collect()
}

/// Picks the tower with the most matching observations.
///
/// Ties go to the tower listed first. A tower with no matches is never
/// selected, so this returns `None` when nothing matches.
pub fn select_best_tower(towers: &[Tower], observations: &[Observation]) -> Option<MatchGroup> {
    let index = CellIndex::build(observations);
    let (best, _) = towers.iter().fold(
        (None::<&Tower>, 0usize),
        |(best, max_matches), tower| {
            let count = index.count(tower.cell_id);
            if count > max_matches {
                (Some(tower), count)
            } else {
                (best, max_matches)
            }
        },
    );

    best.map(|tower| MatchGroup {
        tower: *tower,
        observations: index.matches(tower.cell_id).iter().map(|o| **o).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(cell_id: i64, signal: i32) -> Observation {
        Observation {
            latitude: 43.0,
            longitude: 12.5,
            altitude: None,
            cell_id,
            signal,
        }
    }

    fn observations_for(counts: &[(i64, usize)]) -> Vec<Observation> {
        counts
            .iter()
            .flat_map(|&(cell_id, n)| (0..n).map(move |i| obs(cell_id, i as i32)))
            .collect()
    }

    #[test]
    fn larger_group_after_smaller_wins() {
        let towers = [
            Tower::new(43.0, 12.0, 1),
            Tower::new(43.1, 12.1, 2),
            Tower::new(43.2, 12.2, 3),
        ];
        let observations = observations_for(&[(1, 2), (2, 3), (3, 3)]);
        let best = select_best_tower(&towers, &observations).unwrap();
        assert_eq!(best.tower, towers[1]);
        assert_eq!(best.match_count(), 3);
    }

    #[test]
    fn tie_goes_to_first_tower() {
        let towers = [Tower::new(43.0, 12.0, 5), Tower::new(43.1, 12.1, 6)];
        let observations = observations_for(&[(6, 2), (5, 2)]);
        assert_eq!(select_best_tower(&towers, &observations).unwrap().tower.cell_id, 5);
    }

    #[test]
    fn no_towers_or_no_matches_yield_none() {
        let observations = observations_for(&[(1, 4)]);
        assert!(select_best_tower(&[], &observations).is_none());
        assert!(select_best_tower(&[Tower::new(43.0, 12.0, 9)], &observations).is_none());
        assert!(select_best_tower(&[Tower::new(43.0, 12.0, 1)], &[]).is_none());
    }

    #[test]
    fn match_group_preserves_observation_order() {
        let observations = vec![obs(1, 10), obs(2, 99), obs(1, 20), obs(1, 30)];
        let best = select_best_tower(&[Tower::new(43.0, 12.0, 1)], &observations).unwrap();
        let signals: Vec<i32> = best.observations.iter().map(|o| o.signal).collect();
        assert_eq!(signals, vec![10, 20, 30]);
    }

    #[test]
    fn match_counts_follow_tower_order() {
        let towers = [
            Tower::new(43.0, 12.0, 3),
            Tower::new(43.0, 12.0, 4),
            Tower::new(43.0, 12.0, 1),
        ];
        let observations = observations_for(&[(1, 2), (3, 1)]);
        assert_eq!(match_counts(&towers, &observations), vec![1, 0, 2]);
    }
}
