//! `gb-sim` — turn loop orchestrator for the rust_gb framework.
//!
//! # Six-phase turn loop
//!
//! ```text
//! for each turn:
//!   ① AwaitSettle    — re-poll until no agent has a reaction in flight.
//!   ② CollectIntents — every agent derives its candidate next cell from
//!                      its path policy (random walks draw from validated
//!                      orthogonal neighbors).
//!   ③ Resolve        — recursive dependency-chain resolution, then
//!                      same-destination arbitration; approved destinations
//!                      are reserved on the board.
//!   ④ Vacate         — every approved mover's origin cell is cleared.
//!   ⑤ Occupy         — movers land in ascending AgentId order: content
//!                      displaced (specials retaliate), occupancy committed,
//!                      path cursors advanced, reservations released.
//!   ⑥ Complete       — observer notified, clock advanced.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`phase`]     | `TurnPhase` — the explicit phase machine               |
//! | [`sim`]       | `Sim`, `SimConfig` — state owner and loop driver       |
//! | [`builder`]   | `SimBuilder` — validated construction                  |
//! | [`executor`]  | reserve / vacate / occupy batches (sole board writer)  |
//! | [`observer`]  | `BoardObserver` hooks for external bookkeeping         |
//! | [`placement`] | tiered spawn planner + population replenishment        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gb_grid::BoardBuilder;
//! use gb_path::PathPolicy;
//! use gb_resolve::Agent;
//! use gb_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let board = BoardBuilder::new(9, 9)?.build();
//! let mut sim = SimBuilder::new(SimConfig::new(42, 100), board)
//!     .agent(Agent::new(CellId(0), PathPolicy::random()))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod observer;
pub mod phase;
pub mod placement;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{BoardObserver, NoopObserver};
pub use phase::TurnPhase;
pub use placement::{PlacementPlanner, PlacementRequest, replenish_count};
pub use sim::{Sim, SimConfig};
