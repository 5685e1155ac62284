//! Destination arbitration: same-destination dedup and its re-blocking
//! cascade.
//!
//! After resolution every agent is terminal, but several `Move` agents may
//! share a destination.  For each contested cell exactly one contender keeps
//! `Move`, chosen uniformly at random; the rest demote to `Blocked`.  A
//! demoted agent no longer vacates its own cell, so any `Move` agent
//! targeting that cell must also demote — the cascade runs transitively
//! until no contested group and no stale follower remains, establishing the
//! destination-uniqueness invariant before execution.

use gb_core::{AgentId, CellId, SimRng};

use crate::{MoveState, Roster};

/// Run the dedup + cascade over the whole roster.  Call after
/// [`resolve_moves`][crate::resolve_moves].
pub fn arbitrate_destinations(roster: &mut Roster, rng: &mut SimRng) {
    let ids: Vec<AgentId> = roster.ids().collect();

    for &id in &ids {
        if roster[id].move_state != MoveState::Move {
            continue;
        }
        let Some(dest) = roster[id].next_cell else { continue };

        let contenders: Vec<AgentId> = ids
            .iter()
            .copied()
            .filter(|&a| roster[a].move_state == MoveState::Move && roster[a].next_cell == Some(dest))
            .collect();
        if contenders.len() < 2 {
            continue;
        }

        let Some(&winner) = rng.choose(&contenders) else { continue };
        for &loser in &contenders {
            if loser != winner {
                roster[loser].move_state = MoveState::Blocked;
                let stale = roster[loser].cell;
                demote_followers(roster, stale);
            }
        }
    }
}

/// Demote every `Move` agent whose destination is `stale` — a cell that will
/// no longer be vacated — and recurse into the cells those agents occupy.
fn demote_followers(roster: &mut Roster, stale: CellId) {
    let followers: Vec<AgentId> = roster
        .ids()
        .filter(|&id| roster[id].move_state == MoveState::Move && roster[id].next_cell == Some(stale))
        .collect();

    for id in followers {
        roster[id].move_state = MoveState::Blocked;
        let cell = roster[id].cell;
        demote_followers(roster, cell);
    }
}
