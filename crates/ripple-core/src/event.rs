//! Event records posted into the dispatcher.

use crate::{ActorId, EventTag, MaterialId};

/// A tagged occurrence with a configured notification radius.
///
/// Immutable and supplied by the caller of `post`; the framework never
/// interprets the tag beyond equality, so the event catalog stays entirely
/// application-defined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub tag: EventTag,
    /// Notification radius in blocks.  Listeners farther than both this and
    /// their own radius never observe the event.
    pub radius: u32,
}

impl Event {
    #[inline]
    pub fn new(tag: EventTag, radius: u32) -> Self {
        Self { tag, radius }
    }
}

/// Contextual data accompanying one event occurrence.
///
/// Both fields are live handles, never persisted — a [`crate::source::PositionSource`]
/// or `VibrationInfo` carries the stable identity across saves instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct EventContext {
    /// The actor that caused the event, if any.
    pub source: Option<ActorId>,
    /// The material affected by the event (broken block, stepped-on
    /// surface, …), if any.
    pub material: Option<MaterialId>,
}

impl EventContext {
    pub const EMPTY: EventContext = EventContext { source: None, material: None };

    #[inline]
    pub fn of_actor(source: ActorId) -> Self {
        Self { source: Some(source), material: None }
    }

    #[inline]
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }
}
