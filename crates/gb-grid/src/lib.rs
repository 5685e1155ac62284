//! `gb-grid` — the shared board: cell flags, occupancy, and reservations.
//!
//! # Crate layout
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`board`] | `Board`, `BoardBuilder`, `Occupant`, `ContentKind`     |
//! | [`query`] | `GridQuery` — the read-only view used by resolution    |
//! | [`error`] | `GridError`, `GridResult<T>`                           |
//!
//! # Ownership
//!
//! The board holds only occupancy back-references to agents; the roster in
//! `gb-resolve` owns the agents themselves.  The occupancy table is ground
//! truth for "who is where" and is mutated exclusively by the turn executor
//! in `gb-sim` — resolution passes consume the board through [`GridQuery`].

pub mod board;
pub mod error;
pub mod query;


pub use board::{Board, BoardBuilder, ContentKind, Occupant};
pub use error::{GridError, GridResult};
pub use query::GridQuery;
