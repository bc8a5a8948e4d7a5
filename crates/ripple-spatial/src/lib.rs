//! `ripple-spatial` — listener indexing over the 16-block cell grid.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`set`]     | `ListenerSet` (reentrancy-safe per-cell index), `Registration`, `DeliveryMode` |
//! | [`grid`]    | `SectionGrid`, `Partition` — per-partition cell registries |
//! | [`tracker`] | `MembershipTracker` — keeps one listener homed in the right cell |
//! | [`ray`]     | voxel line traversal for occlusion probes                  |
//!
//! Everything here is single-threaded by design: the one correctness hazard
//! is *reentrancy* (a visitation callback mutating the set being visited),
//! which [`ListenerSet`] solves structurally with deferred-mutation buffers
//! rather than locks.

pub mod grid;
pub mod ray;
pub mod set;
pub mod tracker;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::{Partition, SectionGrid};
pub use ray::block_line_clear;
pub use set::{DeliveryMode, ListenerSet, Registration};
pub use tracker::MembershipTracker;
