//! The wire-level feedback payload broadcast to nearby observers.

use ripple_core::{PositionSource, Vec3};
use serde::{Deserialize, Serialize};

/// A positioned effect broadcast on propagation start (and on the
/// post-reload resend path).
///
/// Consumed purely for client-side animation — it carries no delivery
/// semantics, and dropping it on the floor affects nothing but visuals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    /// Where the animation starts (the event origin, or the interpolated
    /// in-flight position on a resend).
    pub origin: Vec3,
    /// Ticks of travel remaining from `origin`.
    pub travel_ticks: u64,
    /// Descriptor of the destination anchor, so clients can track a moving
    /// receiver without further traffic.
    pub destination: PositionSource,
}
