//! The per-tick propagation state machine.
//!
//! Each receiver is in one of three states, evaluated once per simulation
//! tick:
//!
//! - **Idle** — no vibration in flight.  Arbitrate the selector buffer; a
//!   winner is committed, its travel time computed, and the feedback
//!   payload broadcast.
//! - **Traveling** — countdown above zero.  Handle the post-reload resend
//!   path, then count down.
//! - **Arrived** — countdown at zero.  Deliver, unless the receiver wants
//!   its neighborhood actively simulating and it isn't — then retry next
//!   tick with the countdown pinned at zero.

use log::debug;
use ripple_core::BlockPos;

use crate::channel::ReceiverChannel;
use crate::feedback::SignalPayload;
use crate::receiver::VibrationReceiver;
use crate::selector::ArbitrationPolicy;
use crate::store::{ReceiverSlot, ReceiverStore};
use crate::world::VibrationWorld;

/// Advance every receiver's channel by one tick.
pub fn tick_all<W: VibrationWorld>(
    store: &mut ReceiverStore,
    world: &mut W,
    policy: &dyn ArbitrationPolicy,
) {
    let ids: Vec<_> = store.ids().collect();
    for id in ids {
        if let Ok(slot) = store.get_mut(id) {
            tick_one(slot, world, policy);
        }
    }
}

/// Advance one receiver's channel by one tick.
pub fn tick_one<W: VibrationWorld>(
    slot: &mut ReceiverSlot,
    world: &mut W,
    policy: &dyn ArbitrationPolicy,
) {
    let ReceiverSlot { behavior, channel, .. } = slot;

    if channel.is_idle() {
        try_select(channel, behavior.as_mut(), world, policy);
        return;
    }

    if channel.travel_ticks_remaining() > 0 {
        if channel.resend_signal() {
            try_resend(channel, behavior.as_ref(), world);
        }
        channel.count_down();
    }
    if channel.travel_ticks_remaining() == 0 {
        try_deliver(channel, behavior.as_mut(), world);
    }
}

// ── Idle: arbitration and commit ─────────────────────────────────────────────

fn try_select<W: VibrationWorld>(
    channel: &mut ReceiverChannel,
    behavior: &mut dyn VibrationReceiver,
    world: &mut W,
    policy: &dyn ArbitrationPolicy,
) {
    if channel.selector().is_empty() {
        return;
    }
    let Some(winner) = policy.choose(channel.selector().candidates()) else {
        channel.selector_mut().clear();
        return;
    };
    let info = winner.info.clone();
    let travel_ticks = behavior.travel_time_ticks(info.distance);

    debug!(
        "vibration {} committed: distance {:.1}, {travel_ticks} ticks",
        info.event.tag, info.distance
    );
    let payload = SignalPayload {
        origin: info.pos,
        travel_ticks,
        destination: behavior.position_source().clone(),
    };
    channel.commit(info, travel_ticks);
    world.broadcast_signal(&payload);
    behavior.on_data_changed();
}

// ── Traveling: the post-reload resend path ───────────────────────────────────

fn try_resend<W: VibrationWorld>(
    channel: &mut ReceiverChannel,
    behavior: &dyn VibrationReceiver,
    world: &mut W,
) {
    let Some(info) = channel.current() else {
        return;
    };
    // Without a resolvable destination there is nothing to interpolate
    // toward; keep the flag and retry next tick.
    let Some(receiver_pos) = behavior.position_source().resolve(world) else {
        return;
    };

    let total = behavior.travel_time_ticks(info.distance).max(1);
    let remaining = channel.travel_ticks_remaining();
    let elapsed_fraction = total.saturating_sub(remaining) as f64 / total as f64;

    let payload = SignalPayload {
        origin: info.pos.lerp(receiver_pos, elapsed_fraction),
        travel_ticks: remaining,
        destination: behavior.position_source().clone(),
    };
    if world.broadcast_signal(&payload) {
        channel.clear_resend_signal();
    }
}

// ── Arrived: delivery ────────────────────────────────────────────────────────

fn try_deliver<W: VibrationWorld>(
    channel: &mut ReceiverChannel,
    behavior: &mut dyn VibrationReceiver,
    world: &mut W,
) {
    let Some(info) = channel.current() else {
        return;
    };

    if behavior.requires_active_neighborhood() {
        let at = behavior
            .position_source()
            .resolve(world)
            .unwrap_or(info.pos);
        if !world.is_area_ticking(BlockPos::containing(at)) {
            return; // deferred; countdown stays pinned at zero
        }
    }

    let source = info.source.and_then(|uuid| world.actor_by_uuid(uuid));
    let projectile_owner = info
        .projectile_owner
        .and_then(|uuid| world.actor_by_uuid(uuid));

    let Some(info) = channel.finish() else {
        return;
    };
    debug!("vibration {} delivered at distance {:.1}", info.event.tag, info.distance);
    behavior.on_receive_vibration(info.pos, info.event, source, projectile_owner, info.distance);
    behavior.on_data_changed();
}
