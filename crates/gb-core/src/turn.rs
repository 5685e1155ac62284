//! Discrete turn model.
//!
//! The puzzle advances in whole turns: every agent's intent is computed,
//! resolved, and executed once per turn.  There is no wall-clock mapping —
//! a `Turn` is the only time unit the framework knows about.

use std::fmt;

// ── Turn ──────────────────────────────────────────────────────────────────────

/// An absolute turn counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// Return the turn `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Turn {
        Turn(self.0 + n)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn {}", self.0)
    }
}

// ── TurnClock ─────────────────────────────────────────────────────────────────

/// Tracks the current turn.  Passed inside the simulation context instead of
/// living behind a global — every component that needs the turn number reads
/// it from here.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnClock {
    /// The current turn — advanced by `TurnClock::advance()` once per
    /// completed turn.
    pub current_turn: Turn,
}

impl TurnClock {
    pub fn new() -> Self {
        Self { current_turn: Turn::ZERO }
    }

    /// Advance the clock by one turn.
    #[inline]
    pub fn advance(&mut self) {
        self.current_turn = Turn(self.current_turn.0 + 1);
    }
}
