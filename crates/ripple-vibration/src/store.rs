//! Slot storage for receivers and their channels.

use ripple_core::{ListenerId, RippleError, RippleResult};
use ripple_spatial::MembershipTracker;

use crate::channel::ReceiverChannel;
use crate::receiver::VibrationReceiver;

/// One receiver: its behavior, its channel, and its cell-membership state.
///
/// The channel co-lives with the receiver — created on construction (or
/// decoded from persisted state) and discarded wholesale on removal.
pub struct ReceiverSlot {
    pub behavior: Box<dyn VibrationReceiver>,
    pub channel: ReceiverChannel,
    pub(crate) tracker: MembershipTracker,
}

/// Dense slot storage; `ListenerId` is the slot index, freed slots are
/// reused.
#[derive(Default)]
pub struct ReceiverStore {
    slots: Vec<Option<ReceiverSlot>>,
}

impl ReceiverStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new receiver with a fresh idle channel.
    pub fn insert(&mut self, behavior: Box<dyn VibrationReceiver>) -> ListenerId {
        self.insert_with_channel(behavior, ReceiverChannel::new())
    }

    /// Store a new receiver with a pre-existing channel (the reload path).
    pub fn insert_with_channel(
        &mut self,
        behavior: Box<dyn VibrationReceiver>,
        channel: ReceiverChannel,
    ) -> ListenerId {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or_else(|| {
                self.slots.push(None);
                self.slots.len() - 1
            });
        let id = ListenerId(index as u32);
        self.slots[index] = Some(ReceiverSlot {
            behavior,
            channel,
            tracker: MembershipTracker::new(id),
        });
        id
    }

    pub fn get(&self, id: ListenerId) -> RippleResult<&ReceiverSlot> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(RippleError::ListenerNotFound(id))
    }

    pub fn get_mut(&mut self, id: ListenerId) -> RippleResult<&mut ReceiverSlot> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(RippleError::ListenerNotFound(id))
    }

    /// Remove and return a receiver, freeing its slot for reuse.
    pub fn take(&mut self, id: ListenerId) -> Option<ReceiverSlot> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// All live listener ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| ListenerId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
