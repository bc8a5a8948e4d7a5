//! `ListenerSet` — the per-cell listener index.
//!
//! # Why the deferred-mutation buffers
//!
//! A visitation callback may itself register or unregister listeners in the
//! very set being iterated (a delivered receiver tearing itself down is the
//! canonical case).  Mutating the live `Vec` mid-iteration would corrupt the
//! walk, so while the `processing` flag is set all mutations land in pending
//! buffers instead and are flushed when the *outermost* visitation
//! completes.  Single-threaded, so no locks — the flag is the whole
//! mechanism.

use ripple_core::{ActorView, ListenerId, PositionSource, Vec3};
use rustc_hash::FxHashSet;

// ── Registration ─────────────────────────────────────────────────────────────

/// How a matched listener wants the dispatcher to hand the event over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Deliver synchronously, inside the visitation callback.
    Immediate,
    /// Collect into a batch and deliver in ascending-distance order once all
    /// cells are visited.  Required for nearest-wins receiver policies.
    #[default]
    ByDistance,
}

/// One cell-index entry: a listener handle plus everything the index needs
/// to gate and route a visit without consulting the receiver itself.
#[derive(Clone, Debug)]
pub struct Registration {
    pub listener: ListenerId,
    pub source: PositionSource,
    /// The listener's own interest radius, in blocks.
    pub radius: u32,
    pub mode: DeliveryMode,
}

impl Registration {
    #[inline]
    fn radius_sq(&self) -> f64 {
        f64::from(self.radius) * f64::from(self.radius)
    }
}

// ── ListenerSet ──────────────────────────────────────────────────────────────

/// The set of listeners registered in one spatial cell.
#[derive(Default)]
pub struct ListenerSet {
    active: Vec<Registration>,
    pending_add: Vec<Registration>,
    pending_remove: FxHashSet<ListenerId>,
    processing: bool,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener to the set (replacing any prior entry for the same
    /// handle).  Buffered if a visitation is currently in progress.
    pub fn register(&mut self, reg: Registration) {
        if self.processing {
            self.pending_add.push(reg);
        } else {
            self.insert_now(reg);
        }
    }

    /// Remove a listener from the set.  Buffered if a visitation is
    /// currently in progress; the listener is skipped for the remainder of
    /// that visitation.
    pub fn unregister(&mut self, listener: ListenerId) {
        if self.processing {
            self.pending_remove.insert(listener);
        } else {
            self.active.retain(|r| r.listener != listener);
        }
    }

    /// Visit every registered listener whose resolved position lies within
    /// its own radius of `origin`.  Returns whether any listener matched.
    ///
    /// Listeners whose position cannot currently be resolved are silently
    /// skipped.  The visitor receives the set itself, so callbacks may
    /// freely register/unregister (including the listener being visited)
    /// without corrupting the iteration.
    pub fn visit_in_range<A, F>(&mut self, origin: Vec3, actors: &A, mut visitor: F) -> bool
    where
        A: ActorView,
        F: FnMut(&mut ListenerSet, &Registration, Vec3),
    {
        let outermost = !self.processing;
        self.processing = true;

        let mut matched = false;
        let mut i = 0;
        // `active` cannot grow or shrink while `processing` is set, so
        // index-based iteration is stable even across reentrant calls.
        while i < self.active.len() {
            let reg = self.active[i].clone();
            i += 1;

            if self.pending_remove.contains(&reg.listener) {
                continue;
            }
            let Some(pos) = reg.source.resolve(actors) else {
                continue;
            };
            if pos.distance_sq(origin) > reg.radius_sq() {
                continue;
            }
            matched = true;
            visitor(self, &reg, pos);
        }

        if outermost {
            self.processing = false;
            self.flush_pending();
        }
        matched
    }

    /// `true` once the set holds nothing (and nothing is about to be added),
    /// letting the owning partition reclaim it.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.pending_add.is_empty()
    }

    /// Number of live entries (pending mutations not yet counted).
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` while a visitation is in progress.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// `true` if `listener` is currently in the live set.
    pub fn contains(&self, listener: ListenerId) -> bool {
        self.active.iter().any(|r| r.listener == listener)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn insert_now(&mut self, reg: Registration) {
        match self.active.iter_mut().find(|r| r.listener == reg.listener) {
            Some(slot) => *slot = reg,
            None => self.active.push(reg),
        }
    }

    /// Apply buffered mutations: removals first, then additions, so a
    /// listener removed and re-added during one visitation ends up present.
    fn flush_pending(&mut self) {
        if !self.pending_remove.is_empty() {
            let remove = std::mem::take(&mut self.pending_remove);
            self.active.retain(|r| !remove.contains(&r.listener));
        }
        for reg in std::mem::take(&mut self.pending_add) {
            self.insert_now(reg);
        }
    }
}
