//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need to surface one of these cases.

use thiserror::Error;

use crate::EntityId;

/// Errors shared by every `gd-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} is not a guard")]
    NotAGuard(EntityId),

    #[error("{0} already holds the guard role")]
    AlreadyAGuard(EntityId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `gd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
