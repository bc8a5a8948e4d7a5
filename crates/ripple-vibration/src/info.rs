//! `VibrationInfo` — the immutable record of one accepted vibration.

use ripple_core::{ActorUuid, Event, Vec3};
use serde::{Deserialize, Serialize};

/// Everything the ticker needs to deliver a vibration, frozen at acceptance
/// time.
///
/// Actor references are stored as stable uuids and re-resolved to live
/// handles at delivery, so a save/load (or the actor despawning) mid-flight
/// never dangles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VibrationInfo {
    pub event: Event,
    /// Origin-to-receiver distance measured when the candidate was accepted.
    pub distance: f32,
    /// The event's origin position.
    pub pos: Vec3,
    /// Stable identity of the originating actor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ActorUuid>,
    /// Stable identity of the actor that launched the originating
    /// projectile, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectile_owner: Option<ActorUuid>,
}

impl VibrationInfo {
    pub fn new(
        event: Event,
        distance: f32,
        pos: Vec3,
        source: Option<ActorUuid>,
        projectile_owner: Option<ActorUuid>,
    ) -> Self {
        Self { event, distance, pos, source, projectile_owner }
    }
}
