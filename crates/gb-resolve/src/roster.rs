//! The per-board agent roster: a slot arena owning every live agent.
//!
//! # Why a slot arena
//!
//! Agents are created when pieces are placed and destroyed when they are
//! collected or cleared, so the population changes mid-run.  Freed slots are
//! reused by later inserts, which keeps `AgentId`s dense and stable — an ID
//! handed out once is never silently re-pointed while its agent lives.
//! Iteration is slot order, which equals insertion order for a roster that
//! only grows; the resolver accepts this as its (stable) tie-break order.
//!
//! # Why RNGs live beside the roster
//!
//! Target collection needs `&mut` access to an agent's RNG while reading the
//! rest of the roster; keeping the RNG streams in a separate [`RosterRngs`]
//! gives the borrow checker disjoint structs to split.

use gb_core::{AgentId, AgentRng, CellId};
use std::ops::{Index, IndexMut};

use crate::Agent;

// ── Roster ────────────────────────────────────────────────────────────────────

/// Exclusive owner of all live agents on one board.
#[derive(Debug, Default)]
pub struct Roster {
    slots: Vec<Option<Agent>>,
}

impl Roster {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add `agent`, reusing the first free slot.  Returns its ID.
    pub fn insert(&mut self, agent: Agent) -> AgentId {
        match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(agent);
                AgentId(free as u32)
            }
            None => {
                self.slots.push(Some(agent));
                AgentId((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Remove the agent in slot `id`, freeing the slot.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// IDs of all live agents in slot (insertion) order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| AgentId(i as u32)))
    }

    /// The agent currently recorded at `cell`, if any.
    pub fn agent_at(&self, cell: CellId) -> Option<AgentId> {
        self.ids().find(|&id| self[id].cell == cell)
    }

    /// `true` when every live agent reports settled — the turn loop's
    /// barrier condition.
    pub fn all_settled(&self) -> bool {
        self.ids().all(|id| self[id].is_settled())
    }
}

impl Index<AgentId> for Roster {
    type Output = Agent;

    /// # Panics
    /// Panics if `id` does not name a live agent — a roster ID is only valid
    /// between its `insert` and `remove`.
    fn index(&self, id: AgentId) -> &Agent {
        self.slots[id.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("no live agent in slot {id}"))
    }
}

impl IndexMut<AgentId> for Roster {
    fn index_mut(&mut self, id: AgentId) -> &mut Agent {
        self.slots[id.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("no live agent in slot {id}"))
    }
}

// ── RosterRngs ────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG streams, parallel to the roster slots.
///
/// Streams are created lazily on first use and keyed by slot index, so an
/// agent reusing a freed slot inherits a fresh position in the same seeded
/// stream family — reproducible for a given seed and insertion history.
pub struct RosterRngs {
    global_seed: u64,
    inner: Vec<Option<AgentRng>>,
}

impl RosterRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { global_seed, inner: Vec::new() }
    }

    /// Mutable reference to one agent's RNG, creating the stream on first use.
    pub fn get_mut(&mut self, id: AgentId) -> &mut AgentRng {
        if self.inner.len() <= id.index() {
            self.inner.resize_with(id.index() + 1, || None);
        }
        self.inner[id.index()].get_or_insert_with(|| AgentRng::new(self.global_seed, id))
    }
}
