//! A single movable grid-bound entity.

use gb_core::CellId;
use gb_path::{PathPolicy, PathProgress};

use crate::MoveState;

// ── AgentKind ─────────────────────────────────────────────────────────────────

/// Agent toughness level.  Special content striking an agent knocks it down
/// one level; a level-1 agent is removed outright.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum AgentKind {
    Lv1,
    Lv2,
    Lv3,
}

impl AgentKind {
    /// The level after taking one attack, or `None` when the agent is
    /// destroyed by it.
    pub fn after_attack(self) -> Option<AgentKind> {
        match self {
            AgentKind::Lv3 => Some(AgentKind::Lv2),
            AgentKind::Lv2 => Some(AgentKind::Lv1),
            AgentKind::Lv1 => None,
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One autonomous piece on the board.
///
/// The roster owns every `Agent`; the grid's occupancy table holds only a
/// back-reference.  `cell` is unique among live agents except inside the
/// executor's brief vacate/occupy window.
#[derive(Debug)]
pub struct Agent {
    /// Current occupied cell.
    pub cell: CellId,

    /// Toughness level.
    pub kind: AgentKind,

    /// Color attribute — matched against `ContentKind::Plain` colors by the
    /// placement planner's second tier.
    pub attribute: u8,

    /// How this agent derives its candidate next cell.
    pub policy: PathPolicy,

    /// Policy-private progress cursor.
    pub progress: PathProgress,

    /// Outcome of the current resolution pass.
    pub move_state: MoveState,

    /// Candidate destination for the current turn; `None` = no path.
    pub next_cell: Option<CellId>,

    /// Busy flag: a relocation is in flight.
    pub is_moving: bool,

    /// Busy flag: an attack reaction is in flight.
    pub is_under_attack: bool,

    /// The cell occupied before the most recent move — the placement
    /// planner's anti-repeat tier reads this.
    pub last_cell: Option<CellId>,
}

impl Agent {
    /// A level-1 agent at `cell` following `policy`.
    pub fn new(cell: CellId, policy: PathPolicy) -> Self {
        Self {
            cell,
            kind: AgentKind::Lv1,
            attribute: 0,
            policy,
            progress: PathProgress::default(),
            move_state: MoveState::Ready,
            next_cell: None,
            is_moving: false,
            is_under_attack: false,
            last_cell: None,
        }
    }

    pub fn with_kind(mut self, kind: AgentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_attribute(mut self, attribute: u8) -> Self {
        self.attribute = attribute;
        self
    }

    /// Take one hit from special content.  Returns `false` when the hit
    /// destroys the agent (caller removes it from the roster).
    pub fn take_attack(&mut self) -> bool {
        match self.kind.after_attack() {
            Some(kind) => {
                self.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Eligible for the next turn: no relocation or attack reaction pending.
    #[inline]
    pub fn is_settled(&self) -> bool {
        !self.is_moving && !self.is_under_attack
    }

    /// Current resolution outcome.
    #[inline]
    pub fn current_move_state(&self) -> MoveState {
        self.move_state
    }
}
