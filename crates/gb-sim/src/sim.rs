//! The `Sim` struct and its phased turn loop.

use gb_core::{AgentId, CellId, SimRng, TurnClock};
use gb_grid::Board;
use gb_resolve::{
    Roster, RosterRngs, approved_intents, arbitrate_destinations, resolve_moves, set_turn_targets,
};

use crate::{BoardObserver, SimError, SimResult, TurnPhase, executor};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Global run configuration.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master seed.  The same seed with the same board setup and insertion
    /// history reproduces a run exactly.
    pub seed: u64,

    /// Turn count for [`Sim::run`].
    pub max_turns: u64,
}

impl SimConfig {
    pub fn new(seed: u64, max_turns: u64) -> Self {
        Self { seed, max_turns }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main board runner.
///
/// `Sim` owns all board state and drives the six-phase turn loop (see
/// [`TurnPhase`]); [`step`][Sim::step] advances one phase, [`run_turn`]
/// [Sim::run_turn] drives a full turn, [`run`][Sim::run] drives
/// `config.max_turns` of them.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (seed, turn budget).
    pub config: SimConfig,

    /// The turn counter — advanced once per completed turn.
    pub clock: TurnClock,

    /// The shared grid.  Resolution reads it; the executor writes it.
    pub board: Board,

    /// All live agents.
    pub roster: Roster,

    /// Per-agent deterministic RNG streams (random-walk draws).
    pub agent_rngs: RosterRngs,

    /// Board-level RNG (destination arbitration, placement draws).
    pub board_rng: SimRng,

    /// Where the current turn stands.
    phase: TurnPhase,

    /// Approved movers for the turn in flight, ascending `AgentId` order.
    movers: Vec<(AgentId, CellId)>,
}

impl Sim {
    pub(crate) fn from_parts(
        config: SimConfig,
        board: Board,
        roster: Roster,
        agent_rngs: RosterRngs,
        board_rng: SimRng,
    ) -> Self {
        Self {
            config,
            clock: TurnClock::new(),
            board,
            roster,
            agent_rngs,
            board_rng,
            phase: TurnPhase::AwaitSettle,
            movers: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Run turns until the clock reaches `config.max_turns`.
    ///
    /// Calls observer hooks at every turn boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: BoardObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_turn.0 < self.config.max_turns {
            self.run_turn(observer)?;
        }
        Ok(())
    }

    /// Run exactly `n` turns from the current position (ignores `max_turns`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_turns<O: BoardObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_turn(observer)?;
        }
        Ok(())
    }

    /// Drive one full turn through every phase.
    ///
    /// # Errors
    ///
    /// [`SimError::AgentsUnsettled`] if an agent still carries a busy flag
    /// from outside the loop; callers owning external reactions must clear
    /// them (or call [`teardown`][Sim::teardown]) before advancing.
    pub fn run_turn<O: BoardObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.phase = TurnPhase::AwaitSettle;
        if self.step(observer)? == TurnPhase::AwaitSettle {
            return Err(SimError::AgentsUnsettled);
        }
        while !self.phase.is_complete() {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Abort any turn in flight and leave the board consistent: every
    /// reservation released, every busy flag and candidate cleared, and any
    /// mover caught between vacate and occupy put back at its origin.
    pub fn teardown(&mut self) {
        self.board.release_all();
        let ids: Vec<AgentId> = self.roster.ids().collect();
        for id in ids {
            if self.roster[id].is_moving {
                let origin = self.roster[id].cell;
                if let Err(e) = self.board.place_agent(origin, id) {
                    log::warn!("teardown could not restore {id} at {origin}: {e}");
                }
            }
            let agent = &mut self.roster[id];
            agent.is_moving = false;
            agent.is_under_attack = false;
            agent.next_cell = None;
        }
        self.movers.clear();
        self.phase = TurnPhase::AwaitSettle;
    }

    // ── Phase machine ─────────────────────────────────────────────────────

    /// Advance the turn by one phase and return the phase now pending.
    ///
    /// `AwaitSettle` re-polls (returns itself) until every agent is settled;
    /// `Complete` rolls over into the next turn's `AwaitSettle`.
    pub fn step<O: BoardObserver>(&mut self, observer: &mut O) -> SimResult<TurnPhase> {
        self.phase = match self.phase {
            TurnPhase::AwaitSettle => {
                if self.roster.all_settled() {
                    TurnPhase::CollectIntents
                } else {
                    TurnPhase::AwaitSettle
                }
            }

            TurnPhase::CollectIntents => {
                set_turn_targets(&mut self.roster, &mut self.agent_rngs, &self.board);
                TurnPhase::Resolve
            }

            TurnPhase::Resolve => {
                resolve_moves(&mut self.roster, &self.board);
                arbitrate_destinations(&mut self.roster, &mut self.board_rng);

                // Hash-map order is not stable; the executor commits movers
                // in ascending AgentId order for determinism.
                self.movers = approved_intents(&self.roster).into_iter().collect();
                self.movers.sort_unstable_by_key(|&(id, _)| id);

                executor::reserve_destinations(&mut self.board, &self.movers)?;
                TurnPhase::Vacate
            }

            TurnPhase::Vacate => {
                executor::vacate(&mut self.board, &mut self.roster, &self.movers);
                TurnPhase::Occupy
            }

            TurnPhase::Occupy => {
                let moved =
                    executor::occupy(&mut self.board, &mut self.roster, &self.movers, observer)?;
                executor::finish_turn(&mut self.roster, observer);
                observer.on_turn_end(self.clock.current_turn, moved);
                self.clock.advance();
                self.movers.clear();
                TurnPhase::Complete
            }

            TurnPhase::Complete => TurnPhase::AwaitSettle,
        };
        Ok(self.phase)
    }
}
