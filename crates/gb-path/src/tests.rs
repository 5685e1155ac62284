//! Unit tests for gb-path.

use gb_core::{AgentId, AgentRng, CellId};
use rustc_hash::FxHashSet;

use crate::{PathPolicy, PathProgress};

fn cells(ids: &[u16]) -> Vec<CellId> {
    ids.iter().map(|&i| CellId(i)).collect()
}

fn rng() -> AgentRng {
    AgentRng::new(42, AgentId(0))
}

/// Walk a fixed-sequence policy: candidate then advance, collecting each
/// candidate, for `steps` turns.
fn walk(policy: &PathPolicy, steps: usize) -> Vec<Option<CellId>> {
    let mut progress = PathProgress::default();
    let mut rng = rng();
    let mut seen = Vec::with_capacity(steps);
    for _ in 0..steps {
        let candidate = policy.candidate(&progress, &[], &mut rng);
        seen.push(candidate);
        if candidate.is_some() {
            policy.advance(&mut progress);
        }
    }
    seen
}

#[cfg(test)]
mod oneway {
    use super::*;

    #[test]
    fn walks_once_then_stops() {
        let policy = PathPolicy::Oneway { cells: cells(&[0, 1, 2]) };
        assert_eq!(
            walk(&policy, 4),
            vec![Some(CellId(1)), Some(CellId(2)), None, None]
        );
    }

    #[test]
    fn single_cell_never_moves() {
        let policy = PathPolicy::Oneway { cells: cells(&[5]) };
        assert_eq!(walk(&policy, 2), vec![None, None]);
    }
}

#[cfg(test)]
mod return_path {
    use super::*;

    #[test]
    fn oscillates_forever() {
        let policy = PathPolicy::Return { cells: cells(&[0, 1, 2]) };
        // 0→1→2→1→0→1→… flipping direction at each endpoint.
        assert_eq!(
            walk(&policy, 6),
            vec![
                Some(CellId(1)),
                Some(CellId(2)),
                Some(CellId(1)),
                Some(CellId(0)),
                Some(CellId(1)),
                Some(CellId(2)),
            ]
        );
    }

    #[test]
    fn direction_flag_flips_at_endpoints() {
        let policy = PathPolicy::Return { cells: cells(&[0, 1]) };
        let mut progress = PathProgress::default();
        policy.advance(&mut progress);
        assert!(progress.inverted);
        policy.advance(&mut progress);
        assert!(!progress.inverted);
    }

    #[test]
    fn degenerate_paths_yield_no_candidate() {
        let mut rng = rng();
        let empty = PathPolicy::Return { cells: vec![] };
        let single = PathPolicy::Return { cells: cells(&[3]) };
        let progress = PathProgress::default();
        assert_eq!(empty.candidate(&progress, &[], &mut rng), None);
        assert_eq!(single.candidate(&progress, &[], &mut rng), None);
    }
}

#[cfg(test)]
mod loop_path {
    use super::*;

    #[test]
    fn wraps_to_start() {
        let policy = PathPolicy::Loop { cells: cells(&[0, 1, 2]) };
        assert_eq!(
            walk(&policy, 5),
            vec![
                Some(CellId(1)),
                Some(CellId(2)),
                Some(CellId(0)),
                Some(CellId(1)),
                Some(CellId(2)),
            ]
        );
    }

    #[test]
    fn empty_loop_yields_no_candidate() {
        let policy = PathPolicy::Loop { cells: vec![] };
        assert_eq!(walk(&policy, 2), vec![None, None]);
    }
}

#[cfg(test)]
mod random_walk {
    use super::*;

    #[test]
    fn picks_from_supplied_neighbors() {
        let policy = PathPolicy::random();
        let mut rng = rng();
        let neighbors = cells(&[1, 5]);
        for _ in 0..50 {
            let pick = policy
                .candidate(&PathProgress::default(), &neighbors, &mut rng)
                .unwrap();
            assert!(neighbors.contains(&pick));
        }
    }

    #[test]
    fn forbidden_cells_are_excluded() {
        let mut forbidden = FxHashSet::default();
        forbidden.insert(CellId(1));
        let policy = PathPolicy::Random { forbidden };
        let mut rng = rng();
        let neighbors = cells(&[1, 5]);
        for _ in 0..50 {
            assert_eq!(
                policy.candidate(&PathProgress::default(), &neighbors, &mut rng),
                Some(CellId(5))
            );
        }
    }

    #[test]
    fn no_valid_neighbors_means_no_candidate() {
        let mut forbidden = FxHashSet::default();
        forbidden.insert(CellId(2));
        let policy = PathPolicy::Random { forbidden };
        let mut rng = rng();
        assert_eq!(
            policy.candidate(&PathProgress::default(), &[], &mut rng),
            None
        );
        assert_eq!(
            policy.candidate(&PathProgress::default(), &cells(&[2]), &mut rng),
            None
        );
    }

    #[test]
    fn advance_is_a_no_op() {
        let policy = PathPolicy::random();
        let mut progress = PathProgress::default();
        policy.advance(&mut progress);
        assert_eq!(progress, PathProgress::default());
    }
}
