//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `GbError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, CellId};

/// The top-level error type for `gb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GbError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("cell {0} is outside the board")]
    CellOutOfBounds(CellId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gb-*` crates.
pub type GbResult<T> = Result<T, GbError>;
