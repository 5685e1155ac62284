//! `gb-path` — pure path policies for grid-bound agents.
//!
//! A [`PathPolicy`] maps an agent's [`PathProgress`] to a candidate next
//! cell.  Policies are pure: they never query the grid, so the movement
//! resolver in `gb-resolve` stays the only component that interprets cell
//! validity.

pub mod policy;

#[cfg(test)]
mod tests;

pub use policy::{PathPolicy, PathProgress};
