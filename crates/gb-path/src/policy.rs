//! Path policies: how an agent derives its candidate next cell.
//!
//! # Purity
//!
//! Policies know nothing about the grid beyond the cell IDs they are handed.
//! Fixed-sequence policies read only their own sequence and cursor; the
//! `Random` policy is given the list of *already grid-validated* orthogonal
//! neighbors by the caller and only applies its forbidden-cell filter and a
//! uniform draw.  This keeps every variant unit-testable without a board.
//!
//! # Candidate vs. advance
//!
//! [`candidate`][PathPolicy::candidate] is called during intent collection
//! and never mutates the cursor.  [`advance`][PathPolicy::advance] commits
//! the cursor and is called only when the resolved state is `Move` — a
//! blocked agent retries the same step next turn.

use gb_core::{AgentRng, CellId};
use rustc_hash::FxHashSet;

// ── PathProgress ──────────────────────────────────────────────────────────────

/// Policy-private progress state: an ordinal position along a fixed path and
/// a traversal-direction flag for reversible paths.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathProgress {
    /// Index into the fixed path sequence.  Unused by `Random`.
    pub cursor: usize,

    /// `true` while a `Return` path is being retraced toward its start.
    pub inverted: bool,
}

// ── PathPolicy ────────────────────────────────────────────────────────────────

/// The four path kinds.  Fixed sequences are loaded once at board setup and
/// never change afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathPolicy {
    /// Follow `cells` once, front to back; no candidate at the last element.
    Oneway { cells: Vec<CellId> },

    /// Follow `cells` to the end, then retrace to the start, forever.  The
    /// direction flag flips at each endpoint.
    Return { cells: Vec<CellId> },

    /// Follow `cells` forward; after the last element the candidate wraps
    /// back to the first, producing a cyclic tour.
    Loop { cells: Vec<CellId> },

    /// No fixed sequence: pick uniformly among the supplied valid orthogonal
    /// neighbors, excluding the per-agent forbidden set.
    Random { forbidden: FxHashSet<CellId> },
}

impl PathPolicy {
    /// A random-walk policy with no forbidden cells.
    pub fn random() -> Self {
        PathPolicy::Random { forbidden: FxHashSet::default() }
    }

    /// `true` for the three fixed-sequence kinds.
    pub fn has_fixed_path(&self) -> bool {
        !matches!(self, PathPolicy::Random { .. })
    }

    /// The candidate next cell for the current turn, or `None` when the
    /// policy offers no step (resolved as `Stay` by the caller).
    ///
    /// `valid_neighbors` is consulted only by `Random`; fixed-sequence kinds
    /// ignore it.
    pub fn candidate(
        &self,
        progress: &PathProgress,
        valid_neighbors: &[CellId],
        rng: &mut AgentRng,
    ) -> Option<CellId> {
        match self {
            PathPolicy::Oneway { cells } => cells.get(progress.cursor + 1).copied(),

            PathPolicy::Return { cells } => {
                if cells.len() < 2 {
                    return None;
                }
                if progress.inverted {
                    progress.cursor.checked_sub(1).map(|i| cells[i])
                } else {
                    cells.get(progress.cursor + 1).copied()
                }
            }

            PathPolicy::Loop { cells } => {
                if cells.is_empty() {
                    return None;
                }
                Some(cells[(progress.cursor + 1) % cells.len()])
            }

            PathPolicy::Random { forbidden } => {
                let open: Vec<CellId> = valid_neighbors
                    .iter()
                    .copied()
                    .filter(|cell| !forbidden.contains(cell))
                    .collect();
                rng.choose(&open).copied()
            }
        }
    }

    /// Commit the progress cursor after an approved move.
    pub fn advance(&self, progress: &mut PathProgress) {
        match self {
            PathPolicy::Oneway { .. } => progress.cursor += 1,

            PathPolicy::Return { cells } => {
                if cells.len() < 2 {
                    return;
                }
                if progress.inverted {
                    progress.cursor -= 1;
                    if progress.cursor == 0 {
                        progress.inverted = false;
                    }
                } else {
                    progress.cursor += 1;
                    if progress.cursor == cells.len() - 1 {
                        progress.inverted = true;
                    }
                }
            }

            PathPolicy::Loop { cells } => {
                if !cells.is_empty() {
                    progress.cursor = (progress.cursor + 1) % cells.len();
                }
            }

            // Random walks carry no cursor.
            PathPolicy::Random { .. } => {}
        }
    }
}
