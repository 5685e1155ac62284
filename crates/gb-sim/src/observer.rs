//! Board observer trait for external bookkeeping.
//!
//! Scoring, mission counters, pooling, and rendering all live outside this
//! workspace; they attach through these callbacks instead of the turn loop
//! knowing about any of them.

use gb_core::{AgentId, CellId, Turn};
use gb_grid::ContentKind;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the turn loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — blocked-move counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct BlockCounter { blocked: usize }
///
/// impl BoardObserver for BlockCounter {
///     fn on_agent_blocked(&mut self, _agent: AgentId) {
///         self.blocked += 1;
///     }
/// }
/// ```
pub trait BoardObserver {
    /// An agent finished its relocation and now occupies `cell`.
    fn on_agent_reached_destination(&mut self, _agent: AgentId, _cell: CellId) {}

    /// An agent's move was refused this turn (wall, swap, lost arbitration).
    fn on_agent_blocked(&mut self, _agent: AgentId) {}

    /// Loose content at `cell` was displaced by an arriving agent.
    fn on_content_removed(&mut self, _cell: CellId, _kind: ContentKind) {}

    /// An agent was destroyed (special-content retaliation) at `cell`.
    fn on_agent_removed(&mut self, _agent: AgentId, _cell: CellId) {}

    /// The turn finished; `moved` is the number of agents that relocated.
    fn on_turn_end(&mut self, _turn: Turn, _moved: usize) {}
}

/// A [`BoardObserver`] that does nothing.  Use when you need to run turns
/// but don't want callbacks.
pub struct NoopObserver;

impl BoardObserver for NoopObserver {}
