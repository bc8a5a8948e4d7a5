//! `ReceiverChannel` — per-receiver propagation state, with persistence.
//!
//! # Invariants
//!
//! - At most one non-empty `current` vibration at a time; admission while
//!   one is in flight is the single programmatic violation this module
//!   guards against (the gate checks it, [`commit`] debug-asserts it).
//! - `travel_ticks_remaining` only ever decreases while a vibration is in
//!   flight and is meaningless otherwise (it is zeroed on decode when no
//!   vibration is present).
//!
//! [`commit`]: ReceiverChannel::commit

use ripple_core::{RippleError, RippleResult};
use serde::{Deserialize, Serialize};

use crate::info::VibrationInfo;
use crate::selector::Selector;

/// The channel co-owned by one receiver: its in-flight vibration, travel
/// countdown, and candidate buffer.
///
/// Serialized field names (`event`, `event_delay`, `selector`) are the
/// receiver-local persisted state contract; `resend_signal` is runtime-only
/// and re-derived on load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReceiverChannel {
    #[serde(rename = "event", default, skip_serializing_if = "Option::is_none")]
    current: Option<VibrationInfo>,
    #[serde(rename = "event_delay", default)]
    travel_ticks_remaining: u64,
    #[serde(default)]
    selector: Selector,
    /// Set after a reload with a vibration in flight: the client-side
    /// animation was lost with the session and must be re-broadcast.
    #[serde(skip)]
    resend_signal: bool,
}

impl ReceiverChannel {
    /// A fresh, idle channel.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&VibrationInfo> {
        self.current.as_ref()
    }

    pub fn travel_ticks_remaining(&self) -> u64 {
        self.travel_ticks_remaining
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.selector
    }

    pub fn resend_signal(&self) -> bool {
        self.resend_signal
    }

    // ── Ticker-facing transitions ─────────────────────────────────────────

    /// Commit an arbitration winner as the in-flight vibration.
    pub(crate) fn commit(&mut self, info: VibrationInfo, travel_ticks: u64) {
        debug_assert!(self.current.is_none(), "commit while a vibration is in flight");
        self.current = Some(info);
        self.travel_ticks_remaining = travel_ticks;
        self.selector.clear();
    }

    /// Advance the countdown by one tick, floored at zero.
    pub(crate) fn count_down(&mut self) {
        self.travel_ticks_remaining = self.travel_ticks_remaining.saturating_sub(1);
    }

    /// Deliver/abandon the in-flight vibration, returning the channel to Idle.
    pub(crate) fn finish(&mut self) -> Option<VibrationInfo> {
        self.travel_ticks_remaining = 0;
        self.current.take()
    }

    pub(crate) fn clear_resend_signal(&mut self) {
        self.resend_signal = false;
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Serialize to the persisted JSON document.
    pub fn encode(&self) -> RippleResult<String> {
        serde_json::to_string(self).map_err(|e| RippleError::Persist(e.to_string()))
    }

    /// Decode a persisted channel, surfacing malformed input as an error.
    ///
    /// A successfully decoded in-flight vibration arms `resend_signal` so
    /// the ticker re-broadcasts the animation payload lost with the session.
    pub fn try_decode(json: &str) -> RippleResult<Self> {
        let mut channel: Self =
            serde_json::from_str(json).map_err(|e| RippleError::Persist(e.to_string()))?;
        if channel.current.is_some() {
            channel.resend_signal = true;
        } else {
            // The countdown is meaningless without a vibration.
            channel.travel_ticks_remaining = 0;
        }
        Ok(channel)
    }

    /// Decode a persisted channel; malformed input degrades to an empty
    /// (Idle) channel rather than failing world load.
    pub fn decode(json: &str) -> Self {
        Self::try_decode(json).unwrap_or_default()
    }
}
