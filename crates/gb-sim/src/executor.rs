//! The turn executor: the only occupancy writer.
//!
//! Execution is split into a vacate batch and an occupy batch so that chains
//! and rings commit correctly: every approved mover's origin is cleared
//! before any mover lands, which is exactly the window in which a rotation's
//! members may step into each other's cells.  All decisions were made
//! against the turn-start snapshot during resolution; nothing computed here
//! feeds back into the same turn's decisions.

use gb_core::{AgentId, CellId};
use gb_grid::{Board, Occupant};
use gb_resolve::{MoveState, Roster};

use crate::{BoardObserver, SimResult};

/// Mark every approved destination as incoming on the board.
///
/// Reservations make in-flight movers visible to anything reading the board
/// between phases (`occupant_or_incoming`), and are released cell by cell as
/// movers land.
pub fn reserve_destinations(board: &mut Board, movers: &[(AgentId, CellId)]) -> SimResult<()> {
    for &(agent, dest) in movers {
        board.reserve(dest, agent)?;
    }
    Ok(())
}

/// Vacate batch: clear every approved mover's origin cell and raise its
/// busy flag.
pub fn vacate(board: &mut Board, roster: &mut Roster, movers: &[(AgentId, CellId)]) {
    for &(agent, _) in movers {
        let origin = roster[agent].cell;
        board.clear_cell(origin);
        roster[agent].is_moving = true;
    }
}

/// Occupy batch: land every approved mover at its destination.
///
/// Per mover, in ascending `AgentId` order (the caller sorts): displace any
/// content at the destination, apply special-content retaliation, commit the
/// agent's cell, advance its path cursor, release the reservation, and drop
/// the busy flag.  Returns the number of agents that actually landed.
pub fn occupy<O: BoardObserver>(
    board: &mut Board,
    roster: &mut Roster,
    movers: &[(AgentId, CellId)],
    observer: &mut O,
) -> SimResult<usize> {
    let mut landed = 0;

    for &(agent, dest) in movers {
        // Destination uniqueness plus the vacate batch guarantee the cell
        // holds content or nothing; an agent here is a corrupted board.
        let mut retaliated = false;
        match board.occupant(dest) {
            Some(Occupant::Content(kind)) => {
                board.clear_cell(dest);
                observer.on_content_removed(dest, kind);
                retaliated = kind.is_high_value();
            }
            Some(Occupant::Agent(other)) => {
                log::warn!("mover {agent} found {other} still at {dest}; dropping the move");
                board.release(dest);
                roster[agent].is_moving = false;
                continue;
            }
            None => {}
        }

        if retaliated && !roster[agent].take_attack() {
            // The stomped special content destroyed the mover.  Its origin is
            // already vacant; the destination stays empty.
            board.release(dest);
            roster.remove(agent);
            observer.on_agent_removed(agent, dest);
            continue;
        }

        let origin = roster[agent].cell;
        roster[agent].last_cell = Some(origin);
        roster[agent].cell = dest;
        let a = &mut roster[agent];
        a.policy.advance(&mut a.progress);

        board.place_agent(dest, agent)?;
        board.release(dest);
        roster[agent].is_moving = false;

        observer.on_agent_reached_destination(agent, dest);
        landed += 1;
    }

    Ok(landed)
}

/// End-of-turn bookkeeping for every agent: report blocked reactions and
/// clear candidates.  Move states are left as-is; the next pass's target
/// collection resets them to `Ready`.
pub fn finish_turn<O: BoardObserver>(roster: &mut Roster, observer: &mut O) {
    let ids: Vec<AgentId> = roster.ids().collect();
    for id in ids {
        if roster[id].move_state == MoveState::Blocked {
            observer.on_agent_blocked(id);
        }
        roster[id].next_cell = None;
    }
}
