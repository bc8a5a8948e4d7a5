//! The acceptance gate and the six-probe occlusion test.
//!
//! Every incoming candidate runs the gate exactly once, in a fixed order,
//! short-circuiting on the first failure.  Acceptance does *not* commit the
//! vibration — it only buffers the candidate; the selector resolves the
//! winner at end of tick.

use log::trace;
use ripple_core::{BlockPos, BlockView, Event, EventContext, Tick, Vec3};
use ripple_spatial::block_line_clear;

use crate::channel::ReceiverChannel;
use crate::info::VibrationInfo;
use crate::receiver::VibrationReceiver;
use crate::world::VibrationWorld;

/// Offer one candidate to a receiver's channel.  Returns whether it passed
/// the gate and was buffered.
///
/// Gate order:
/// 1. an in-flight vibration blocks all new candidates (no queueing);
/// 2. allow-list / spectator / quiet-source checks;
/// 3. the receiver's own position must resolve;
/// 4. the receiver's custom veto;
/// 5. the origin→receiver path must not be occluded.
pub fn offer<W: VibrationWorld>(
    channel: &mut ReceiverChannel,
    behavior: &dyn VibrationReceiver,
    world: &W,
    event: Event,
    origin: Vec3,
    ctx: &EventContext,
    now: Tick,
) -> bool {
    if channel.current().is_some() {
        return false;
    }

    if !behavior.is_valid_vibration(event, ctx) {
        return false;
    }
    if let Some(actor) = ctx.source {
        if world.is_spectator(actor) {
            return false;
        }
        if world.is_quiet(actor) && !behavior.detects_quiet_sources() {
            return false;
        }
    }

    let Some(receiver_pos) = behavior.position_source().resolve(world) else {
        return false;
    };

    if !behavior.can_receive_vibration(origin, event, ctx) {
        return false;
    }

    if is_occluded(world, origin, receiver_pos) {
        trace!("candidate {} at {origin} occluded", event.tag);
        return false;
    }

    let distance = origin.distance(receiver_pos) as f32;
    let source = ctx.source.and_then(|a| world.uuid_of(a));
    let projectile_owner = ctx
        .source
        .and_then(|a| world.projectile_owner(a))
        .and_then(|a| world.uuid_of(a));

    channel.selector_mut().add(
        VibrationInfo::new(event, distance, origin, source, projectile_owner),
        now,
    );
    true
}

/// One offset per axis direction: up, down, north, south, west, east.
const PROBE_OFFSETS: [Vec3; 6] = [
    Vec3 { x: 0.0, y: 1.0, z: 0.0 },
    Vec3 { x: 0.0, y: -1.0, z: 0.0 },
    Vec3 { x: 0.0, y: 0.0, z: -1.0 },
    Vec3 { x: 0.0, y: 0.0, z: 1.0 },
    Vec3 { x: -1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 1.0, y: 0.0, z: 0.0 },
];

/// Soft multi-ray occlusion test.
///
/// Six probe rays run from one-voxel axis-aligned offsets of the origin's
/// block-center toward the receiver's block-center.  The path counts as
/// occluded only when *all six* probes are blocked; a single clear probe
/// defeats occlusion.  This compensates for single-ray rasterization edge
/// cases exactly on grid boundaries.
pub fn is_occluded<B: BlockView>(view: &B, origin: Vec3, receiver: Vec3) -> bool {
    let from = BlockPos::containing(origin).center();
    let to = BlockPos::containing(receiver).center();

    PROBE_OFFSETS
        .iter()
        .all(|&off| !block_line_clear(from + off, to, view))
}
