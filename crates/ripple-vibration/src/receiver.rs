//! The `VibrationReceiver` trait — the main extension point for user code.

use ripple_core::{ActorId, Event, EventContext, PositionSource, Vec3};
use ripple_spatial::DeliveryMode;

/// Pluggable receiver behavior, injected per receiver instance.
///
/// Implement this to define what a receiver listens for and what happens
/// when a vibration finally arrives.  Only the first four items are
/// required; everything else has a sensible default.
///
/// The framework is single-threaded (see the crate docs), so implementations
/// need no `Send`/`Sync` and may hold `Rc`/`RefCell` state freely.
pub trait VibrationReceiver {
    /// Interest radius in blocks.  Events farther away are never offered.
    fn listener_radius(&self) -> u32;

    /// Where this receiver listens from.  May resolve to nothing while the
    /// anchor is unloaded — the receiver is then simply unreachable.
    fn position_source(&self) -> &PositionSource;

    /// Tag/context allow-list: `false` rejects the candidate outright.
    fn is_valid_vibration(&self, event: Event, ctx: &EventContext) -> bool;

    /// Called when an accepted vibration finishes traveling.
    ///
    /// `source` and `projectile_owner` are the re-resolved live actors; both
    /// tolerate the actor having despawned mid-flight.  `distance` is the
    /// origin-to-receiver distance measured at acceptance time.
    fn on_receive_vibration(
        &mut self,
        origin: Vec3,
        event: Event,
        source: Option<ActorId>,
        projectile_owner: Option<ActorId>,
        distance: f32,
    );

    /// Receiver-specific spatial/contextual veto, evaluated after the
    /// allow-list but before occlusion.  Default: accept everything.
    fn can_receive_vibration(&self, _origin: Vec3, _event: Event, _ctx: &EventContext) -> bool {
        true
    }

    /// Travel delay for an accepted vibration.  Default: one tick per block
    /// of distance, rounded down.
    fn travel_time_ticks(&self, distance: f32) -> u64 {
        distance.max(0.0).floor() as u64
    }

    /// `true` if delivery must wait until the receiver's spatial
    /// neighborhood is actively simulating.  Default: deliver regardless.
    fn requires_active_neighborhood(&self) -> bool {
        false
    }

    /// `true` to detect sources that deliberately suppress detection
    /// (quiet movement).  Default: honor the suppression.
    fn detects_quiet_sources(&self) -> bool {
        false
    }

    /// Notification that the channel's persisted state changed (candidate
    /// committed or delivered).  Default: no-op.
    fn on_data_changed(&mut self) {}

    /// How the dispatcher should hand events over.  Distance-sensitive
    /// receivers keep the default so nearest-wins arbitration stays sound.
    fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::ByDistance
    }
}
