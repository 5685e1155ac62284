//! Fluent builder for constructing a [`Sim`].

use gb_core::SimRng;
use gb_grid::Board;
use gb_resolve::{Agent, Roster, RosterRngs};

use crate::{Sim, SimConfig, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — master seed, turn budget
/// - [`Board`] — from [`gb_grid::BoardBuilder`]
///
/// # Agents
///
/// Queue agents with [`agent`][SimBuilder::agent]; `build()` inserts them
/// into the roster in queue order (so IDs are assignment order) and records
/// each one in the board's occupancy table, rejecting agents whose cell is
/// out of bounds, unplaceable, or already taken.
///
/// # Example
///
/// ```rust,ignore
/// let board = BoardBuilder::new(9, 9)?.build();
/// let mut sim = SimBuilder::new(SimConfig::new(42, 100), board)
///     .agent(Agent::new(CellId(0), PathPolicy::random()))
///     .agent(Agent::new(CellId(80), PathPolicy::Loop { cells }))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    board: Board,
    agents: Vec<Agent>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, board: Board) -> Self {
        Self { config, board, agents: Vec::new() }
    }

    /// Queue one agent for placement at its recorded cell.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Queue a batch of agents.
    pub fn agents<I: IntoIterator<Item = Agent>>(mut self, agents: I) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Validate placements, seed the RNG streams, and return a ready-to-run
    /// [`Sim`].
    ///
    /// # Errors
    ///
    /// A queued agent on an out-of-bounds, unplaceable, or occupied cell
    /// surfaces as [`SimError::Grid`][crate::SimError::Grid].
    pub fn build(self) -> SimResult<Sim> {
        let mut board = self.board;
        let mut roster = Roster::new();

        for agent in self.agents {
            let cell = agent.cell;
            let id = roster.insert(agent);
            if let Err(e) = board.place_agent(cell, id) {
                return Err(e.into());
            }
        }

        let agent_rngs = RosterRngs::new(self.config.seed);
        // Separate stream for board-level draws so arbitration never shares
        // state with any agent's random walk.
        let mut master = SimRng::new(self.config.seed);
        let board_rng = master.child(1);

        Ok(Sim::from_parts(self.config, board, roster, agent_rngs, board_rng))
    }
}
