//! `gb-resolve` — the simultaneous multi-agent movement resolver.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`state`]       | `MoveState` — per-pass resolution outcome                      |
//! | [`agent`]       | `Agent`, `AgentKind`                                           |
//! | [`roster`]      | `Roster` (slot arena owning all agents), `RosterRngs`          |
//! | [`resolver`]    | target collection + recursive dependency-chain resolution      |
//! | [`arbitration`] | same-destination dedup and its re-blocking cascade             |
//!
//! # The per-turn pipeline
//!
//! ```rust,ignore
//! set_turn_targets(&mut roster, &mut rngs, &board);  // intents
//! resolve_moves(&mut roster, &board);                // Move/Blocked/Stay
//! arbitrate_destinations(&mut roster, &mut sim_rng); // destination uniqueness
//! let intents = approved_intents(&roster);           // handed to the executor
//! ```
//!
//! Everything here is side-effect-free with respect to the grid: resolution
//! reads the board through `GridQuery` only.  The turn executor in `gb-sim`
//! is the sole occupancy writer.

pub mod agent;
pub mod arbitration;
pub mod resolver;
pub mod roster;
pub mod state;


pub use agent::{Agent, AgentKind};
pub use arbitration::arbitrate_destinations;
pub use resolver::{approved_intents, is_valid_destination, resolve_moves, set_turn_targets};
pub use roster::{Roster, RosterRngs};
pub use state::MoveState;
