//! `VibrationSystem` — the facade wiring dispatch, gating, and ticking.

use ripple_core::{ActorView, Event, EventContext, ListenerId, RippleResult, Tick, Vec3};
use ripple_dispatch::Dispatcher;
use ripple_spatial::{Registration, SectionGrid};

use crate::channel::ReceiverChannel;
use crate::gate;
use crate::receiver::VibrationReceiver;
use crate::selector::{ArbitrationPolicy, NearestWins};
use crate::store::ReceiverStore;
use crate::ticker;
use crate::world::VibrationWorld;

/// Owns every receiver and drives the full propagation pipeline:
/// `post` → dispatch → gate → selector, then `tick` → arbitration →
/// countdown → delivery.
pub struct VibrationSystem {
    receivers: ReceiverStore,
    dispatcher: Dispatcher,
    policy: Box<dyn ArbitrationPolicy>,
}

impl Default for VibrationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VibrationSystem {
    /// A system with the default [`NearestWins`] arbitration policy.
    pub fn new() -> Self {
        Self::with_policy(Box::new(NearestWins))
    }

    /// A system with a caller-chosen arbitration policy.
    pub fn with_policy(policy: Box<dyn ArbitrationPolicy>) -> Self {
        Self {
            receivers: ReceiverStore::new(),
            dispatcher: Dispatcher::new(),
            policy,
        }
    }

    // ── Receiver lifecycle ────────────────────────────────────────────────

    /// Add a receiver with a fresh channel and home it into the grid.
    pub fn add_receiver<A: ActorView>(
        &mut self,
        behavior: Box<dyn VibrationReceiver>,
        grid: &mut SectionGrid,
        actors: &A,
    ) -> ListenerId {
        self.restore_receiver(behavior, ReceiverChannel::new(), grid, actors)
    }

    /// Add a receiver with a channel decoded from persisted state.
    pub fn restore_receiver<A: ActorView>(
        &mut self,
        behavior: Box<dyn VibrationReceiver>,
        channel: ReceiverChannel,
        grid: &mut SectionGrid,
        actors: &A,
    ) -> ListenerId {
        let id = self.receivers.insert_with_channel(behavior, channel);
        if let Ok(slot) = self.receivers.get_mut(id) {
            let reg = registration_of(id, slot.behavior.as_ref());
            slot.tracker.add(grid, &reg, actors);
        }
        id
    }

    /// Remove a receiver, unregistering it from its cell.  Any in-flight
    /// vibration is discarded with the channel.
    pub fn remove_receiver(&mut self, id: ListenerId, grid: &mut SectionGrid) -> bool {
        match self.receivers.take(id) {
            Some(mut slot) => {
                slot.tracker.remove(grid);
                true
            }
            None => false,
        }
    }

    /// Re-home every receiver whose resolved position moved to a new cell.
    /// Call once per tick (or whenever anchors may have moved).
    pub fn update_positions<A: ActorView>(&mut self, grid: &mut SectionGrid, actors: &A) {
        let ids: Vec<_> = self.receivers.ids().collect();
        for id in ids {
            if let Ok(slot) = self.receivers.get_mut(id) {
                let reg = registration_of(id, slot.behavior.as_ref());
                slot.tracker.update(grid, &reg, actors);
            }
        }
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    /// Post one event: dispatch to every listener in range and run each
    /// match through its receiver's acceptance gate.  Accepted candidates
    /// sit in their channels' selector buffers until [`tick`].
    ///
    /// Returns whether any listener observed the event (diagnostics only).
    ///
    /// [`tick`]: Self::tick
    pub fn post<W: VibrationWorld>(
        &mut self,
        grid: &mut SectionGrid,
        world: &W,
        event: Event,
        origin: Vec3,
        ctx: EventContext,
        now: Tick,
    ) -> bool {
        let receivers = &mut self.receivers;
        self.dispatcher.post(grid, world, event, origin, |reg, _pos| {
            if let Ok(slot) = receivers.get_mut(reg.listener) {
                gate::offer(
                    &mut slot.channel,
                    slot.behavior.as_ref(),
                    world,
                    event,
                    origin,
                    &ctx,
                    now,
                );
            }
        })
    }

    /// Run the propagation state machine once over every receiver.
    pub fn tick<W: VibrationWorld>(&mut self, world: &mut W) {
        ticker::tick_all(&mut self.receivers, world, self.policy.as_ref());
    }

    // ── Channel access (persistence boundary) ─────────────────────────────

    pub fn channel(&self, id: ListenerId) -> RippleResult<&ReceiverChannel> {
        Ok(&self.receivers.get(id)?.channel)
    }

    pub fn channel_mut(&mut self, id: ListenerId) -> RippleResult<&mut ReceiverChannel> {
        Ok(&mut self.receivers.get_mut(id)?.channel)
    }

    pub fn receivers(&self) -> &ReceiverStore {
        &self.receivers
    }

    pub fn receivers_mut(&mut self) -> &mut ReceiverStore {
        &mut self.receivers
    }
}

/// Snapshot a receiver's registry entry from its behavior.
fn registration_of(id: ListenerId, behavior: &dyn VibrationReceiver) -> Registration {
    Registration {
        listener: id,
        source: behavior.position_source().clone(),
        radius: behavior.listener_radius(),
        mode: behavior.delivery_mode(),
    }
}
