//! `PositionSource` — a position that resolves to a point *or* nothing.
//!
//! Listeners and feedback payloads are anchored to one of two shapes: a
//! fixed block coordinate, or an actor (which may be unloaded at any given
//! moment).  A resolution failure is an explicit `None`, never a sentinel
//! position — treating "unloaded" as "at the origin" is exactly the kind of
//! bug this type exists to prevent.

use std::cell::Cell;

use crate::{ActorId, ActorUuid, ActorView, BlockPos, Vec3};

/// A maybe-resolvable anchor position.
///
/// The actor variant carries the stable [`ActorUuid`] (the identity that is
/// serialized) plus a cached live [`ActorId`] handle used as a fast path; the
/// cache is revalidated on every resolve and refreshed from the uuid when
/// stale.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionSource {
    /// Anchored at the center of a fixed voxel.
    Block(BlockPos),
    /// Anchored to an actor, offset vertically (e.g. ear height).
    Actor {
        uuid: ActorUuid,
        /// Live-handle fast path; never persisted.
        #[cfg_attr(feature = "serde", serde(skip))]
        cached: Cell<Option<ActorId>>,
        y_offset: f32,
    },
}

impl PositionSource {
    #[inline]
    pub fn block(pos: BlockPos) -> Self {
        Self::Block(pos)
    }

    /// Actor-relative source with a pre-seeded live handle.
    pub fn actor(handle: ActorId, uuid: ActorUuid, y_offset: f32) -> Self {
        Self::Actor {
            uuid,
            cached: Cell::new(Some(handle)),
            y_offset,
        }
    }

    /// Actor-relative source known only by stable identity (the reload path —
    /// the live handle is recovered lazily on first resolve).
    pub fn actor_by_uuid(uuid: ActorUuid, y_offset: f32) -> Self {
        Self::Actor {
            uuid,
            cached: Cell::new(None),
            y_offset,
        }
    }

    /// Resolve to a point, or `None` if the anchor is currently unloaded.
    pub fn resolve<A: ActorView>(&self, actors: &A) -> Option<Vec3> {
        match self {
            Self::Block(pos) => Some(pos.center()),
            Self::Actor { uuid, cached, y_offset } => {
                if let Some(handle) = cached.get() {
                    if let Some(pos) = actors.position_of(handle) {
                        return Some(pos.offset_y(f64::from(*y_offset)));
                    }
                    // Handle went stale (actor despawned or was reloaded
                    // under a new id) — fall back to the uuid lookup.
                    cached.set(None);
                }
                let handle = actors.actor_by_uuid(*uuid)?;
                cached.set(Some(handle));
                actors
                    .position_of(handle)
                    .map(|pos| pos.offset_y(f64::from(*y_offset)))
            }
        }
    }
}

/// Equality ignores the live-handle cache: two sources are the same anchor
/// if they name the same block or the same actor identity.
impl PartialEq for PositionSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Block(a), Self::Block(b)) => a == b,
            (
                Self::Actor { uuid: ua, y_offset: ya, .. },
                Self::Actor { uuid: ub, y_offset: yb, .. },
            ) => ua == ub && ya == yb,
            _ => false,
        }
    }
}
