//! `SectionGrid` — per-partition listener registries keyed by cell coordinate.
//!
//! Registries belong to the partition that owns the cells, not to a
//! process-wide singleton: unloading a column drops every `ListenerSet` in
//! it wholesale.  Sets are created lazily on first registration and
//! reclaimed as soon as they go empty (the owner-driven rendition of an
//! `on_empty` callback — in Rust the owner is right here, so it checks
//! instead of being called back).

use ripple_core::{ColumnPos, ListenerId, SectionPos};
use rustc_hash::FxHashMap;

use crate::set::ListenerSet;

// ── Partition ────────────────────────────────────────────────────────────────

/// One loaded column's vertical stack of cell registries.
#[derive(Default)]
pub struct Partition {
    sections: FxHashMap<i32, ListenerSet>,
}

impl Partition {
    /// Number of cells that currently have a registry.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ── SectionGrid ──────────────────────────────────────────────────────────────

/// All currently loaded partitions and their cell registries.
#[derive(Default)]
pub struct SectionGrid {
    columns: FxHashMap<ColumnPos, Partition>,
}

impl SectionGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a partition column as loaded.  Idempotent.
    pub fn load(&mut self, column: ColumnPos) {
        self.columns.entry(column).or_default();
    }

    /// Unload a partition column, dropping every listener registry in it.
    /// Returns whether the column was loaded.
    pub fn unload(&mut self, column: ColumnPos) -> bool {
        self.columns.remove(&column).is_some()
    }

    pub fn is_loaded(&self, column: ColumnPos) -> bool {
        self.columns.contains_key(&column)
    }

    /// The registry for `section`, or `None` if its column is unloaded or no
    /// listener has ever registered there.
    pub fn section_mut(&mut self, section: SectionPos) -> Option<&mut ListenerSet> {
        self.columns
            .get_mut(&section.column())?
            .sections
            .get_mut(&section.y)
    }

    /// The registry for `section`, created on demand.  `None` only when the
    /// backing column is not loaded — registration into unloaded space is a
    /// skip, not an error.
    pub fn section_or_create(&mut self, section: SectionPos) -> Option<&mut ListenerSet> {
        Some(
            self.columns
                .get_mut(&section.column())?
                .sections
                .entry(section.y)
                .or_default(),
        )
    }

    /// Drop the registry at `section` if it is empty and not mid-visitation.
    pub fn reclaim_if_empty(&mut self, section: SectionPos) {
        if let Some(partition) = self.columns.get_mut(&section.column()) {
            let reclaim = partition
                .sections
                .get(&section.y)
                .is_some_and(|set| set.is_empty() && !set.is_processing());
            if reclaim {
                partition.sections.remove(&section.y);
            }
        }
    }

    /// Unregister `listener` from `section`'s registry (if it exists) and
    /// reclaim the registry if that left it empty.
    pub fn unregister(&mut self, section: SectionPos, listener: ListenerId) {
        if let Some(set) = self.section_mut(section) {
            set.unregister(listener);
        }
        self.reclaim_if_empty(section);
    }

    /// Number of loaded columns.
    pub fn loaded_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of live registries in `column`, for diagnostics and tests.
    pub fn section_count(&self, column: ColumnPos) -> usize {
        self.columns.get(&column).map_or(0, Partition::section_count)
    }
}
