//! The explicit turn-phase machine.
//!
//! A turn is a fixed sequence of phases, each advanced by one
//! [`Sim::step`][crate::Sim::step] call.  Making the phases explicit (rather
//! than burying them in one long function) keeps every decision point
//! inspectable from tests and lets callers interleave external work between
//! phases.

/// Where the current turn stands.
///
/// ```text
/// AwaitSettle → CollectIntents → Resolve → Vacate → Occupy → Complete
///      ↑                                                        │
///      └────────────────────── next turn ─────────────────────--┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TurnPhase {
    /// Waiting for every agent to report settled (no relocation or attack
    /// reaction in flight).  Re-polled; does not advance until settled.
    #[default]
    AwaitSettle,

    /// Every agent computes its candidate next cell from its path policy.
    CollectIntents,

    /// Recursive dependency-chain resolution plus destination arbitration;
    /// ends with every approved destination reserved on the board.
    Resolve,

    /// Every approved mover's origin cell is cleared in one batch.
    Vacate,

    /// Every approved mover lands: destination content removed, occupancy
    /// committed, path cursor advanced, reservation released.
    Occupy,

    /// The turn is done; the next `step` begins a fresh turn.
    Complete,
}

impl TurnPhase {
    /// `true` once the turn has run to the end.
    #[inline]
    pub fn is_complete(self) -> bool {
        self == TurnPhase::Complete
    }
}
