//! Per-turn movement resolution state.

/// The outcome of one resolution pass for one agent.
///
/// Reset to `Ready` at the start of every pass.  Monotonic within a pass:
/// once an agent reaches any other state the resolver never revisits it —
/// this is what makes the recursive dependency-chain resolution terminate
/// on cyclic path data.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum MoveState {
    /// Not yet resolved this pass.
    #[default]
    Ready,

    /// No candidate next cell: the agent holds its position.
    Stay,

    /// A candidate exists but the way is shut (wall, obstacle, losing
    /// arbitration, or a blocked agent ahead).
    Blocked,

    /// The agent moves to its candidate cell this turn.
    Move,
}

impl MoveState {
    /// `true` once the pass has decided this agent (anything but `Ready`).
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != MoveState::Ready
    }
}
