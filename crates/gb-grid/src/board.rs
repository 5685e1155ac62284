//! Board representation and builder.
//!
//! # Data layout
//!
//! The board is a fixed `width × height` grid addressed by [`CellId`] in
//! row-major order (`cell = row * width + column`).  Per-cell state lives in
//! parallel `Vec`s all of length `width * height`, indexed by
//! `cell.index()` — a contiguous scan is a contiguous memory walk.
//!
//! # Who mutates what
//!
//! Resolution passes only ever see the board through the read-only
//! [`GridQuery`][crate::GridQuery] trait.  The occupancy and reservation
//! mutators on `Board` are reserved for the turn executor; nothing else
//! writes the occupancy table while a turn is being resolved.

use gb_core::{AgentId, CellId};

use crate::{GridError, GridResult};

// ── Cell content ──────────────────────────────────────────────────────────────

/// Non-agent content occupying a cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind {
    /// Ordinary matchable content carrying a color attribute.  Displaceable:
    /// a moving agent removes it on arrival.
    Plain(u8),

    /// Attack-capable special content.  Displaceable, but stomping it costs
    /// the stomping agent an attack (the executor reports the retaliation).
    Special,

    /// Hard content an agent can never displace.
    Hard,
}

impl ContentKind {
    /// `true` if a moving agent may displace this content on arrival.
    #[inline]
    pub fn is_displaceable(self) -> bool {
        !matches!(self, ContentKind::Hard)
    }

    /// `true` for content that can strike adjacent cells — the "high-value
    /// neighbor" the placement planner's first tier seeks out.
    #[inline]
    pub fn is_high_value(self) -> bool {
        matches!(self, ContentKind::Special)
    }

    /// Color attribute, for `Plain` content only.
    #[inline]
    pub fn color(self) -> Option<u8> {
        match self {
            ContentKind::Plain(c) => Some(c),
            _ => None,
        }
    }
}

/// What occupies a cell: a roster agent or loose content.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Occupant {
    Agent(AgentId),
    Content(ContentKind),
}

// ── Board ─────────────────────────────────────────────────────────────────────

/// The shared grid: placeability, obstacle locks, stability, occupancy, and
/// the executor's incoming-reservation marks.
///
/// Do not construct directly; use [`BoardBuilder`].
pub struct Board {
    width: u16,
    height: u16,

    /// A board tile exists at this cell (agents and content may sit here).
    placeable: Vec<bool>,

    /// An obstacle locks this cell; nothing may move into it.
    locked: Vec<bool>,

    /// The cell is settled (not mid-collapse).  Unstable cells are invalid
    /// destinations until the board marks them stable again.
    stable: Vec<bool>,

    /// Occupancy table — ground truth for "who is where".
    occupant: Vec<Option<Occupant>>,

    /// Incoming mark: the agent that has reserved this cell as its move
    /// destination for the current turn.
    reserved_by: Vec<Option<AgentId>>,
}

impl Board {
    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.placeable.len()
    }

    #[inline]
    pub fn contains(&self, cell: CellId) -> bool {
        cell.index() < self.cell_count()
    }

    fn check(&self, cell: CellId) -> GridResult<usize> {
        if self.contains(cell) {
            Ok(cell.index())
        } else {
            Err(GridError::CellOutOfBounds(cell))
        }
    }

    // ── Read access (backing for GridQuery) ───────────────────────────────

    #[inline]
    pub(crate) fn placeable_at(&self, cell: CellId) -> bool {
        self.contains(cell) && self.placeable[cell.index()]
    }

    #[inline]
    pub(crate) fn locked_at(&self, cell: CellId) -> bool {
        self.contains(cell) && self.locked[cell.index()]
    }

    #[inline]
    pub(crate) fn stable_at(&self, cell: CellId) -> bool {
        self.contains(cell) && self.stable[cell.index()]
    }

    /// The occupant of `cell`, if any.  Out-of-bounds reads as empty.
    #[inline]
    pub fn occupant(&self, cell: CellId) -> Option<Occupant> {
        if self.contains(cell) {
            self.occupant[cell.index()]
        } else {
            None
        }
    }

    /// The agent that reserved `cell` as its incoming destination, if any.
    #[inline]
    pub fn reserved_by(&self, cell: CellId) -> Option<AgentId> {
        if self.contains(cell) {
            self.reserved_by[cell.index()]
        } else {
            None
        }
    }

    // ── Occupancy mutators (turn executor only) ───────────────────────────

    /// Record `agent` as the occupant of `cell`.
    ///
    /// # Errors
    ///
    /// Out-of-bounds or already-occupied cells are rejected; the executor
    /// clears the destination before committing a mover.
    pub fn place_agent(&mut self, cell: CellId, agent: AgentId) -> GridResult<()> {
        let i = self.check(cell)?;
        if !self.placeable[i] {
            return Err(GridError::NotPlaceable(cell));
        }
        if self.occupant[i].is_some() {
            return Err(GridError::Occupied(cell));
        }
        self.occupant[i] = Some(Occupant::Agent(agent));
        Ok(())
    }

    /// Put loose content at `cell` (board setup and tests).
    pub fn place_content(&mut self, cell: CellId, kind: ContentKind) -> GridResult<()> {
        let i = self.check(cell)?;
        if !self.placeable[i] {
            return Err(GridError::NotPlaceable(cell));
        }
        if self.occupant[i].is_some() {
            return Err(GridError::Occupied(cell));
        }
        self.occupant[i] = Some(Occupant::Content(kind));
        Ok(())
    }

    /// Clear the occupant of `cell`, returning what was there.
    pub fn clear_cell(&mut self, cell: CellId) -> Option<Occupant> {
        if self.contains(cell) {
            self.occupant[cell.index()].take()
        } else {
            None
        }
    }

    /// Mark `cell` as the incoming destination of `agent`.
    pub fn reserve(&mut self, cell: CellId, agent: AgentId) -> GridResult<()> {
        let i = self.check(cell)?;
        self.reserved_by[i] = Some(agent);
        Ok(())
    }

    /// Drop the incoming mark on `cell`.
    pub fn release(&mut self, cell: CellId) {
        if self.contains(cell) {
            self.reserved_by[cell.index()] = None;
        }
    }

    /// Drop every incoming mark — teardown path.
    pub fn release_all(&mut self) {
        for slot in &mut self.reserved_by {
            *slot = None;
        }
    }

    /// Flip the stability flag of `cell` (the board subsystem calls this
    /// while content above is still falling).
    pub fn set_stable(&mut self, cell: CellId, stable: bool) -> GridResult<()> {
        let i = self.check(cell)?;
        self.stable[i] = stable;
        Ok(())
    }

    // ── Coordinate helpers ────────────────────────────────────────────────

    /// `(row, column)` of `cell`.
    #[inline]
    pub fn coords(&self, cell: CellId) -> (u16, u16) {
        (cell.0 / self.width, cell.0 % self.width)
    }

    /// `CellId` at `(row, column)`; `None` outside the board.
    #[inline]
    pub fn cell_at(&self, row: u16, column: u16) -> Option<CellId> {
        if row < self.height && column < self.width {
            Some(CellId(row * self.width + column))
        } else {
            None
        }
    }
}

// ── BoardBuilder ──────────────────────────────────────────────────────────────

/// Builds a [`Board`] from setup data.
///
/// Every cell starts placeable, unlocked, stable, and empty; setup calls
/// carve out holes, obstacles, and initial content before `build()` freezes
/// the board.
pub struct BoardBuilder {
    board: Board,
}

impl BoardBuilder {
    /// Start a builder for a `width × height` board.
    ///
    /// # Errors
    ///
    /// `width * height` must stay within `CellId`'s addressable range
    /// (`CellId::INVALID` is reserved as the "no cell" sentinel); larger
    /// dimensions are rejected with [`GridError::BoardTooLarge`].
    pub fn new(width: u16, height: u16) -> GridResult<Self> {
        let count = width as usize * height as usize;
        if count > CellId::INVALID.index() {
            return Err(GridError::BoardTooLarge { width, height });
        }
        Ok(Self {
            board: Board {
                width,
                height,
                placeable: vec![true; count],
                locked: vec![false; count],
                stable: vec![true; count],
                occupant: vec![None; count],
                reserved_by: vec![None; count],
            },
        })
    }

    /// Remove `cell` from the placeable region (no board tile there).
    pub fn hole(mut self, cell: CellId) -> GridResult<Self> {
        let i = self.board.check(cell)?;
        self.board.placeable[i] = false;
        Ok(self)
    }

    /// Lock `cell` behind an obstacle.
    pub fn obstacle(mut self, cell: CellId) -> GridResult<Self> {
        let i = self.board.check(cell)?;
        self.board.locked[i] = true;
        Ok(self)
    }

    /// Mark `cell` unstable (mid-settle) at build time.
    pub fn unstable(mut self, cell: CellId) -> GridResult<Self> {
        let i = self.board.check(cell)?;
        self.board.stable[i] = false;
        Ok(self)
    }

    /// Place initial content at `cell`.
    pub fn content(mut self, cell: CellId, kind: ContentKind) -> GridResult<Self> {
        self.board.place_content(cell, kind)?;
        Ok(self)
    }

    pub fn build(self) -> Board {
        self.board
    }
}
