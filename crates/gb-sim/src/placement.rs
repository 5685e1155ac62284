//! Tiered spawn-cell placement.
//!
//! When agents (re)enter the board they should land somewhere interesting
//! rather than uniformly anywhere.  The planner scores the spawn pool in
//! four tiers, takes the first non-empty tier, and draws uniformly inside
//! it:
//!
//! 1. cells orthogonally adjacent to high-value (special) content,
//! 2. cells whose 8-neighborhood holds enough content matching the
//!    request's color attribute,
//! 3. any cell other than the one the agent most recently occupied,
//! 4. whatever is left.
//!
//! Assigned cells are consumed from the pool, so a batch of requests never
//! doubles up.

use gb_core::{CellId, SimRng};
use gb_grid::{ContentKind, GridQuery};

// ── Requests ──────────────────────────────────────────────────────────────────

/// One agent to place.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlacementRequest {
    /// Color attribute, matched against `ContentKind::Plain` colors by
    /// tier 2.
    pub attribute: u8,

    /// Where this agent last stood; tier 3 avoids sending it straight back.
    pub last_cell: Option<CellId>,
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// How many same-attribute neighbors tier 2 demands.
pub const DEFAULT_ATTRIBUTE_THRESHOLD: usize = 5;

/// The tiered placement planner.
#[derive(Copy, Clone, Debug)]
pub struct PlacementPlanner {
    attribute_threshold: usize,
}

impl Default for PlacementPlanner {
    fn default() -> Self {
        Self { attribute_threshold: DEFAULT_ATTRIBUTE_THRESHOLD }
    }
}

impl PlacementPlanner {
    pub fn new(attribute_threshold: usize) -> Self {
        Self { attribute_threshold }
    }

    /// Pick a cell for one request, consuming it from `pool`.
    ///
    /// Cells that are not currently open (unplaceable, locked, unstable, or
    /// occupied) never qualify.  Returns `None` when no pool cell is open.
    pub fn assign(
        &self,
        grid: &impl GridQuery,
        pool: &mut Vec<CellId>,
        request: &PlacementRequest,
        rng: &mut SimRng,
    ) -> Option<CellId> {
        let open: Vec<usize> = (0..pool.len())
            .filter(|&i| is_open(grid, pool[i]))
            .collect();
        if open.is_empty() {
            return None;
        }

        let tiers: [Vec<usize>; 3] = [
            open.iter()
                .copied()
                .filter(|&i| near_high_value(grid, pool[i]))
                .collect(),
            open.iter()
                .copied()
                .filter(|&i| {
                    matching_neighbors(grid, pool[i], request.attribute) >= self.attribute_threshold
                })
                .collect(),
            open.iter()
                .copied()
                .filter(|&i| Some(pool[i]) != request.last_cell)
                .collect(),
        ];

        let candidates = tiers.iter().find(|t| !t.is_empty()).unwrap_or(&open);
        let &slot = rng.choose(candidates)?;
        Some(pool.remove(slot))
    }

    /// Assign every request in order, consuming from one shared pool.
    pub fn plan(
        &self,
        grid: &impl GridQuery,
        mut pool: Vec<CellId>,
        requests: &[PlacementRequest],
        rng: &mut SimRng,
    ) -> Vec<Option<CellId>> {
        requests
            .iter()
            .map(|request| self.assign(grid, &mut pool, request, rng))
            .collect()
    }
}

/// An agent may be placed here right now.
fn is_open(grid: &impl GridQuery, cell: CellId) -> bool {
    grid.is_placeable(cell)
        && !grid.is_locked_by_obstacle(cell)
        && grid.is_stable(cell)
        && grid.is_empty(cell)
        && grid.occupant_or_incoming(cell).is_none()
}

fn near_high_value(grid: &impl GridQuery, cell: CellId) -> bool {
    grid.orthogonal_cells(cell)
        .into_iter()
        .any(|n| grid.occupant_type(n).is_some_and(ContentKind::is_high_value))
}

fn matching_neighbors(grid: &impl GridQuery, cell: CellId, attribute: u8) -> usize {
    grid.adjacent_cells(cell, true)
        .into_iter()
        .filter(|&n| grid.occupant_type(n).and_then(ContentKind::color) == Some(attribute))
        .count()
}

// ── Replenishment ─────────────────────────────────────────────────────────────

/// How many agents to add this round.
///
/// The population tops up to the smaller of the outstanding goal and the
/// on-board cap, and can never exceed the number of open spawn cells.
pub fn replenish_count(
    current: usize,
    remaining_goal: usize,
    max_on_board: usize,
    available: usize,
) -> usize {
    remaining_goal
        .min(max_on_board)
        .saturating_sub(current)
        .min(available)
}
