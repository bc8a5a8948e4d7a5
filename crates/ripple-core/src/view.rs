//! World-capability traits consumed by the propagation core.
//!
//! The framework never owns actors or blocks; it reads them through these
//! narrow views, implemented by the surrounding engine.  Every method is a
//! query — a `None`/`false` answer always means "skip", never "error"
//! (streaming worlds unload things mid-flight as a matter of course).

use crate::{ActorId, ActorUuid, BlockPos, Vec3};

/// Read-only access to the live actor population.
pub trait ActorView {
    /// Current position of a live actor, or `None` if the handle is stale.
    fn position_of(&self, actor: ActorId) -> Option<Vec3>;

    /// Look up the live handle for a stable identity, or `None` if the actor
    /// is not currently loaded.
    fn actor_by_uuid(&self, uuid: ActorUuid) -> Option<ActorId>;

    /// Stable identity of a live actor.
    fn uuid_of(&self, actor: ActorId) -> Option<ActorUuid>;

    /// `true` for observer-only actors that must never trigger detection.
    fn is_spectator(&self, _actor: ActorId) -> bool {
        false
    }

    /// `true` while the actor deliberately suppresses detection (e.g. quiet
    /// movement).  Receivers may opt out of honoring this.
    fn is_quiet(&self, _actor: ActorId) -> bool {
        false
    }

    /// For projectile-like actors, the actor that launched them.
    fn projectile_owner(&self, _actor: ActorId) -> Option<ActorId> {
        None
    }
}

/// Read-only access to the voxel grid, for occlusion tests.
pub trait BlockView {
    /// `true` if the voxel at `pos` is occlusion-classified material that
    /// blocks propagation.
    fn is_occluding(&self, pos: BlockPos) -> bool;
}
