//! Framework error type.
//!
//! Deliberately small: in normal operation every "cannot resolve" condition
//! (unloaded partition, despawned actor, unresolvable position) degrades to
//! a silent skip and is *not* an error.  What remains are genuine API
//! misuses and persistence decode failures.

use thiserror::Error;

use crate::ListenerId;

/// The top-level error type for all `ripple-*` crates.
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("listener {0} not found")]
    ListenerNotFound(ListenerId),

    #[error("persisted channel state: {0}")]
    Persist(String),
}

/// Shorthand result type for all `ripple-*` crates.
pub type RippleResult<T> = Result<T, RippleError>;
