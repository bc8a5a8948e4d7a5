//! The full world capability set the vibration layer needs.

use ripple_core::{ActorView, BlockPos, BlockView};

use crate::feedback::SignalPayload;

/// Everything the gate and ticker read from (or emit into) the surrounding
/// engine: actors, occlusion, simulation activity, and the feedback wire.
pub trait VibrationWorld: ActorView + BlockView {
    /// `true` if the neighborhood of `pos` is actively simulating.  Used
    /// only by receivers that defer delivery until it is.
    fn is_area_ticking(&self, _pos: BlockPos) -> bool {
        true
    }

    /// Broadcast a feedback payload to nearby observers.  Returns whether
    /// at least one observer actually received it.
    fn broadcast_signal(&mut self, payload: &SignalPayload) -> bool;
}
