//! Candidate buffering and arbitration.
//!
//! Several events can pass a receiver's acceptance gate within one tick; at
//! most one may win.  The legacy engine's exact tie-break rule for this race
//! is not pinned down anywhere observable, so the policy is deliberately
//! pluggable rather than silently guessed — [`NearestWins`] is the shipped
//! default, [`MostRecentWins`] the obvious alternative.

use ripple_core::Tick;
use serde::{Deserialize, Serialize};

use crate::info::VibrationInfo;

// ── Candidate / Selector ─────────────────────────────────────────────────────

/// One gate-accepted vibration waiting for end-of-tick arbitration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub info: VibrationInfo,
    /// Tick at which the candidate passed the gate.
    pub tick: Tick,
}

/// The per-channel candidate buffer.  Persists with the channel so a save
/// taken between gate and arbitration loses nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    candidates: Vec<Candidate>,
}

impl Selector {
    /// Buffer an accepted candidate.
    pub fn add(&mut self, info: VibrationInfo, tick: Tick) {
        self.candidates.push(Candidate { info, tick });
    }

    /// Buffered candidates in arrival order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Drop all buffered candidates (start over).
    pub fn clear(&mut self) {
        self.candidates.clear();
    }
}

// ── Arbitration policies ─────────────────────────────────────────────────────

/// Chooses the single winner among same-tick candidates.
pub trait ArbitrationPolicy {
    /// Pick the winning candidate, or `None` to discard them all.
    /// `candidates` is non-empty and in arrival order.
    fn choose<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate>;
}

/// Default policy: the candidate with the smallest acceptance distance wins;
/// equidistant candidates fall back to arrival order (earliest wins).
///
/// Combined with the dispatcher's nearest-first delivery ordering this gives
/// strict nearest-wins semantics across receivers and within one receiver.
pub struct NearestWins;

impl ArbitrationPolicy for NearestWins {
    fn choose<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        candidates
            .iter()
            .reduce(|best, c| if c.info.distance < best.info.distance { c } else { best })
    }
}

/// Alternative policy: the most recently buffered candidate wins.
pub struct MostRecentWins;

impl ArbitrationPolicy for MostRecentWins {
    fn choose<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        candidates.last()
    }
}
