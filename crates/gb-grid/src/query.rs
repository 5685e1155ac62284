//! The read-only grid query interface consumed during resolution.
//!
//! Resolution and placement passes never touch the occupancy mutators; they
//! take `&impl GridQuery` so that tests can drive them with a plain
//! [`Board`] and the executor remains the only writer.

use gb_core::{AgentId, CellId};

use crate::board::{Board, ContentKind, Occupant};

/// Read-only view of the board, answering the questions the movement
/// resolver and placement planner ask.
///
/// The adjacency helpers have default implementations in terms of
/// [`dimensions`][GridQuery::dimensions]; neighbors are returned in
/// up/left/right/down scan order.
pub trait GridQuery {
    /// `(width, height)` of the board.
    fn dimensions(&self) -> (u16, u16);

    /// A board tile exists at `cell`.
    fn is_placeable(&self, cell: CellId) -> bool;

    /// An obstacle locks `cell`.
    fn is_locked_by_obstacle(&self, cell: CellId) -> bool;

    /// `cell` is settled (not mid-collapse).
    fn is_stable(&self, cell: CellId) -> bool;

    /// The kind of loose content at `cell`, if the occupant is content.
    fn occupant_type(&self, cell: CellId) -> Option<ContentKind>;

    /// The agent occupying `cell`, or the agent currently moving into it
    /// (reservation mark), if any.
    fn occupant_or_incoming(&self, cell: CellId) -> Option<AgentId>;

    /// `cell` holds neither an agent nor content.
    fn is_empty(&self, cell: CellId) -> bool;

    /// The up-to-4 orthogonal neighbors of `cell`.
    fn orthogonal_cells(&self, cell: CellId) -> Vec<CellId> {
        self.adjacent_cells(cell, false)
    }

    /// The up-to-8 neighbors of `cell`; orthogonal only unless
    /// `include_diagonals`.
    fn adjacent_cells(&self, cell: CellId, include_diagonals: bool) -> Vec<CellId> {
        let (width, height) = self.dimensions();
        if width == 0 || cell.index() >= width as usize * height as usize {
            return Vec::new();
        }
        let row = (cell.0 / width) as i32;
        let col = (cell.0 % width) as i32;

        let offsets: &[(i32, i32)] = if include_diagonals {
            &[
                (-1, -1), (-1, 0), (-1, 1),
                (0, -1),           (0, 1),
                (1, -1),  (1, 0),  (1, 1),
            ]
        } else {
            &[(-1, 0), (0, -1), (0, 1), (1, 0)]
        };

        let mut neighbors = Vec::with_capacity(offsets.len());
        for &(dr, dc) in offsets {
            let (r, c) = (row + dr, col + dc);
            if r >= 0 && r < height as i32 && c >= 0 && c < width as i32 {
                neighbors.push(CellId(r as u16 * width + c as u16));
            }
        }
        neighbors
    }
}

impl GridQuery for Board {
    #[inline]
    fn dimensions(&self) -> (u16, u16) {
        (self.width(), self.height())
    }

    #[inline]
    fn is_placeable(&self, cell: CellId) -> bool {
        self.placeable_at(cell)
    }

    #[inline]
    fn is_locked_by_obstacle(&self, cell: CellId) -> bool {
        self.locked_at(cell)
    }

    #[inline]
    fn is_stable(&self, cell: CellId) -> bool {
        self.stable_at(cell)
    }

    fn occupant_type(&self, cell: CellId) -> Option<ContentKind> {
        match self.occupant(cell) {
            Some(Occupant::Content(kind)) => Some(kind),
            _ => None,
        }
    }

    fn occupant_or_incoming(&self, cell: CellId) -> Option<AgentId> {
        match self.occupant(cell) {
            Some(Occupant::Agent(agent)) => Some(agent),
            _ => self.reserved_by(cell),
        }
    }

    #[inline]
    fn is_empty(&self, cell: CellId) -> bool {
        self.occupant(cell).is_none()
    }
}
