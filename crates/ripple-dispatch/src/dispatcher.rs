//! The `Dispatcher` and its cell-range walk.

use log::debug;
use ripple_core::{ActorView, BlockPos, Event, SectionPos, Vec3};
use ripple_spatial::{DeliveryMode, Registration, SectionGrid};

/// A by-distance delivery held back until every cell has been visited.
struct Pending {
    reg: Registration,
    pos: Vec3,
    dist_sq: f64,
}

/// Fans posted events out to listeners.  Stateless between posts; the struct
/// only exists so the batch allocation is reused across calls.
#[derive(Default)]
pub struct Dispatcher {
    batch: Vec<Pending>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post one event at `origin`.
    ///
    /// Visits every cell registry inside the cube of side `2R+1` centered on
    /// `origin` (R = the event's notification radius) whose backing column
    /// is loaded.  Matched immediate-mode listeners are delivered inside the
    /// visitation; by-distance listeners are collected, sorted ascending by
    /// distance from `origin` (stable on ties), and delivered afterwards in
    /// that order.
    ///
    /// Returns whether any listener observed the event — a diagnostics
    /// signal only, never used for control flow.
    pub fn post<A, F>(
        &mut self,
        grid: &mut SectionGrid,
        actors: &A,
        event: Event,
        origin: Vec3,
        mut deliver: F,
    ) -> bool
    where
        A: ActorView,
        F: FnMut(&Registration, Vec3),
    {
        debug_assert!(self.batch.is_empty());

        let r = event.radius as i32;
        let center = BlockPos::containing(origin);
        let min = SectionPos::of_block(center.offset(-r, -r, -r));
        let max = SectionPos::of_block(center.offset(r, r, r));

        let batch = &mut self.batch;
        let mut any = false;

        for sx in min.x..=max.x {
            for sz in min.z..=max.z {
                for sy in min.y..=max.y {
                    let section = SectionPos::new(sx, sy, sz);
                    let Some(set) = grid.section_mut(section) else {
                        continue;
                    };
                    any |= set.visit_in_range(origin, actors, |_, reg, pos| match reg.mode {
                        DeliveryMode::Immediate => deliver(reg, pos),
                        DeliveryMode::ByDistance => batch.push(Pending {
                            reg: reg.clone(),
                            pos,
                            dist_sq: pos.distance_sq(origin),
                        }),
                    });
                    grid.reclaim_if_empty(section);
                }
            }
        }

        // Nearest first; Vec::sort_by is stable, so equidistant listeners
        // keep their visitation order.
        batch.sort_by(|a, b| a.dist_sq.total_cmp(&b.dist_sq));
        for pending in batch.drain(..) {
            deliver(&pending.reg, pending.pos);
        }

        debug!("post {} at {origin}: matched={any}", event.tag);
        any
    }
}
