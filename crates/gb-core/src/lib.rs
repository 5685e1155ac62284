//! `gb-core` — foundational types for the `rust_gb` board framework.
//!
//! This crate is a dependency of every other `gb-*` crate.  It intentionally
//! has no `gb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                  |
//! |-----------|-------------------------------------------|
//! | [`ids`]   | `AgentId`, `CellId`                       |
//! | [`turn`]  | `Turn`, `TurnClock`                       |
//! | [`rng`]   | `AgentRng` (per-agent), `SimRng` (board)  |
//! | [`error`] | `GbError`, `GbResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod turn;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GbError, GbResult};
pub use ids::{AgentId, CellId};
pub use rng::{AgentRng, SimRng};
pub use turn::{Turn, TurnClock};
