//! The movement resolver: per-turn target collection and recursive
//! dependency-chain resolution.
//!
//! # Resolution model
//!
//! Every turn is resolved against one consistent snapshot: target collection
//! and state resolution read the board through [`GridQuery`] and never write
//! occupancy.  Agents form dependency chains — "I can move iff the agent in
//! my destination moves" — which the resolver walks recursively with an
//! explicit chain vector:
//!
//! - a chain that closes on itself is a ring of agents that rotates one step
//!   as a unit (everyone in the ring moves);
//! - two agents targeting each other's cells is a head-on swap, which is
//!   never permitted (both block);
//! - anything else inherits the outcome of the agent ahead.
//!
//! States are memoized on the agent: once terminal, a state is never
//! recomputed, so malformed path data cannot recurse forever.

use gb_core::{AgentId, CellId};
use gb_grid::GridQuery;
use rustc_hash::FxHashMap;

use crate::{MoveState, Roster, RosterRngs};

// ── Destination validity ──────────────────────────────────────────────────────

/// Whether the grid lets `agent` enter `cell`: the cell must be placeable,
/// not obstacle-locked, stable, and hold nothing but displaceable content.
/// Another agent's occupancy or incoming reservation shuts the cell.
pub fn is_valid_destination(grid: &impl GridQuery, agent: AgentId, cell: CellId) -> bool {
    if !grid.is_placeable(cell) || grid.is_locked_by_obstacle(cell) || !grid.is_stable(cell) {
        return false;
    }
    match grid.occupant_or_incoming(cell) {
        Some(holder) if holder != agent => return false,
        _ => {}
    }
    match grid.occupant_type(cell) {
        Some(kind) => kind.is_displaceable(),
        None => true,
    }
}

// ── Target collection ─────────────────────────────────────────────────────────

/// Compute every agent's candidate next cell and reset its move state to
/// `Ready`.
///
/// Fixed-sequence policies read only their own cursor.  Random-walk agents
/// are handed their orthogonal neighbors pre-filtered by
/// [`is_valid_destination`] and the draw comes from the agent's own seeded
/// stream.
pub fn set_turn_targets(roster: &mut Roster, rngs: &mut RosterRngs, grid: &impl GridQuery) {
    let ids: Vec<AgentId> = roster.ids().collect();
    for id in ids {
        let valid_neighbors: Vec<CellId> = if roster[id].policy.has_fixed_path() {
            Vec::new()
        } else {
            grid.orthogonal_cells(roster[id].cell)
                .into_iter()
                .filter(|&cell| is_valid_destination(grid, id, cell))
                .collect()
        };

        let agent = &mut roster[id];
        agent.move_state = MoveState::Ready;
        agent.next_cell = agent
            .policy
            .candidate(&agent.progress, &valid_neighbors, rngs.get_mut(id));
    }
}

// ── Recursive resolution ──────────────────────────────────────────────────────

/// Resolve every `Ready` agent to a terminal `Stay`/`Blocked`/`Move` state.
///
/// Iterates the roster in slot order; each unresolved agent starts a fresh
/// chain.  Call after [`set_turn_targets`] and before
/// [`arbitrate_destinations`][crate::arbitrate_destinations].
pub fn resolve_moves(roster: &mut Roster, grid: &impl GridQuery) {
    let ids: Vec<AgentId> = roster.ids().collect();
    for id in ids {
        if roster[id].move_state == MoveState::Ready {
            let mut chain = Vec::new();
            resolve_chain(roster, grid, id, &mut chain);
        }
    }
}

fn resolve_chain(
    roster: &mut Roster,
    grid: &impl GridQuery,
    id: AgentId,
    chain: &mut Vec<AgentId>,
) -> MoveState {
    // Recursion guard: terminal states are final for the pass.
    let state = roster[id].move_state;
    if state.is_terminal() {
        return state;
    }
    chain.push(id);

    let cell = roster[id].cell;

    // The occupancy table is ground truth; an agent whose recorded cell the
    // grid disputes degrades to Blocked and the turn proceeds (recoverable
    // inconsistency, not a crash).
    if grid.occupant_or_incoming(cell) != Some(id) {
        log::warn!("agent {id} claims {cell} but the grid disagrees; blocking it this turn");
        roster[id].move_state = MoveState::Blocked;
        return MoveState::Blocked;
    }

    let Some(next) = roster[id].next_cell else {
        roster[id].move_state = MoveState::Stay;
        return MoveState::Stay;
    };

    let can_move = match roster.agent_at(next) {
        Some(other) => {
            if roster[other].next_cell == Some(cell) {
                // Head-on: a direct swap is never permitted; both refuse.
                roster[other].move_state = MoveState::Blocked;
                false
            } else if chain.contains(&other) {
                // The chain closed into a ring: it rotates one step as a unit.
                roster[other].move_state = MoveState::Move;
                true
            } else {
                resolve_chain(roster, grid, other, chain) == MoveState::Move
            }
        }
        None => is_valid_destination(grid, id, next),
    };

    roster[id].move_state = if can_move { MoveState::Move } else { MoveState::Blocked };
    roster[id].move_state
}

// ── Approved intents ──────────────────────────────────────────────────────────

/// The final intent dictionary: exactly the agents approved to move this
/// turn, mapped to their destination.  Build after arbitration, which
/// guarantees no two keys share a destination.
pub fn approved_intents(roster: &Roster) -> FxHashMap<AgentId, CellId> {
    roster
        .ids()
        .filter(|&id| roster[id].move_state == MoveState::Move)
        .filter_map(|id| roster[id].next_cell.map(|next| (id, next)))
        .collect()
}
