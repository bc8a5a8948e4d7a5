//! `MembershipTracker` — keeps one listener homed in the cell registry
//! matching its current resolved position.
//!
//! Two failure modes it exists to prevent: registry *leaks* (a listener
//! never removed from a stale cell after moving) and *churn* (a listener
//! dropped just because its anchor is briefly unresolvable during a partial
//! load).  A transient resolution failure is therefore always a no-op, never
//! a deregistration.

use log::trace;
use ripple_core::{ActorView, ListenerId, SectionPos};

use crate::grid::SectionGrid;
use crate::set::Registration;

/// Tracks which cell one listener is currently registered in.
#[derive(Debug, Clone)]
pub struct MembershipTracker {
    listener: ListenerId,
    last_section: Option<SectionPos>,
}

impl MembershipTracker {
    /// A tracker for a listener that is not yet homed anywhere.
    pub fn new(listener: ListenerId) -> Self {
        Self { listener, last_section: None }
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// The cell this listener is currently homed in, if any.
    pub fn last_section(&self) -> Option<SectionPos> {
        self.last_section
    }

    /// Home the listener for the first time — identical to [`update`] from
    /// an unhomed state.
    ///
    /// [`update`]: Self::update
    pub fn add<A: ActorView>(&mut self, grid: &mut SectionGrid, reg: &Registration, actors: &A) {
        self.update(grid, reg, actors);
    }

    /// Re-home the listener to the cell matching its current position.
    ///
    /// - Position unresolvable → no-op (stay put).
    /// - Same cell as before → no-op.
    /// - Different cell → unregister from the old cell's registry if that
    ///   storage exists, then register with the new cell's registry if its
    ///   column is loaded.  `last_section` tracks the new cell either way.
    pub fn update<A: ActorView>(&mut self, grid: &mut SectionGrid, reg: &Registration, actors: &A) {
        let Some(pos) = reg.source.resolve(actors) else {
            return;
        };
        let section = SectionPos::of_point(pos);
        if self.last_section == Some(section) {
            return;
        }

        if let Some(old) = self.last_section.take() {
            grid.unregister(old, self.listener);
        }
        self.last_section = Some(section);
        if let Some(set) = grid.section_or_create(section) {
            set.register(reg.clone());
        }
        trace!("listener {} moved to {section}", self.listener);
    }

    /// Unregister from the current cell (if any) and forget it.
    pub fn remove(&mut self, grid: &mut SectionGrid) {
        if let Some(old) = self.last_section.take() {
            grid.unregister(old, self.listener);
        }
    }
}
