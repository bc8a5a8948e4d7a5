//! Unit tests for ripple-spatial.

use std::collections::{HashMap, HashSet};

use ripple_core::{
    ActorId, ActorUuid, ActorView, BlockPos, BlockView, ColumnPos, ListenerId, PositionSource,
    SectionPos, Vec3,
};

use crate::{DeliveryMode, ListenerSet, MembershipTracker, Registration, SectionGrid};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A tiny in-memory actor table keyed by both handle and uuid.
#[derive(Default)]
struct FakeActors {
    positions: HashMap<ActorId, Vec3>,
    by_uuid: HashMap<ActorUuid, ActorId>,
}

impl FakeActors {
    fn spawn(&mut self, id: ActorId, uuid: ActorUuid, pos: Vec3) {
        self.positions.insert(id, pos);
        self.by_uuid.insert(uuid, id);
    }

    fn place(&mut self, id: ActorId, pos: Vec3) {
        self.positions.insert(id, pos);
    }

    fn despawn(&mut self, id: ActorId) {
        self.positions.remove(&id);
        self.by_uuid.retain(|_, v| *v != id);
    }
}

impl ActorView for FakeActors {
    fn position_of(&self, actor: ActorId) -> Option<Vec3> {
        self.positions.get(&actor).copied()
    }

    fn actor_by_uuid(&self, uuid: ActorUuid) -> Option<ActorId> {
        self.by_uuid.get(&uuid).copied()
    }

    fn uuid_of(&self, actor: ActorId) -> Option<ActorUuid> {
        self.by_uuid
            .iter()
            .find(|(_, v)| **v == actor)
            .map(|(k, _)| *k)
    }
}

/// Occluding voxels as an explicit set.
#[derive(Default)]
struct Walls(HashSet<BlockPos>);

impl Walls {
    fn with(blocks: impl IntoIterator<Item = BlockPos>) -> Self {
        Self(blocks.into_iter().collect())
    }
}

impl BlockView for Walls {
    fn is_occluding(&self, pos: BlockPos) -> bool {
        self.0.contains(&pos)
    }
}

/// Block-anchored registration with the default by-distance mode.
fn reg(id: u32, block: BlockPos, radius: u32) -> Registration {
    Registration {
        listener: ListenerId(id),
        source: PositionSource::block(block),
        radius,
        mode: DeliveryMode::ByDistance,
    }
}

// ── ListenerSet ───────────────────────────────────────────────────────────────

mod listener_set {
    use super::*;

    #[test]
    fn radius_gating_uses_listener_radius() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(4, 0, 0), 8)); // ~4.1 blocks away → in range
        set.register(reg(1, BlockPos::new(4, 0, 0), 2)); // same spot, radius too small

        let actors = FakeActors::default();
        let mut visited = vec![];
        let matched = set.visit_in_range(Vec3::new(0.5, 0.5, 0.5), &actors, |_, r, _| {
            visited.push(r.listener);
        });
        assert!(matched);
        assert_eq!(visited, vec![ListenerId(0)]);
    }

    #[test]
    fn no_match_returns_false() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(100, 0, 0), 8));

        let actors = FakeActors::default();
        let matched = set.visit_in_range(Vec3::ZERO, &actors, |_, _, _| {
            panic!("nothing should match");
        });
        assert!(!matched);
    }

    #[test]
    fn unresolved_position_is_skipped_silently() {
        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(9), uuid, Vec3::new(1.0, 0.0, 1.0));

        let mut set = ListenerSet::new();
        set.register(Registration {
            listener: ListenerId(0),
            source: PositionSource::actor(ActorId(9), uuid, 0.0),
            radius: 16,
            mode: DeliveryMode::ByDistance,
        });

        actors.despawn(ActorId(9));
        let matched = set.visit_in_range(Vec3::ZERO, &actors, |_, _, _| {
            panic!("unresolved listener must be skipped");
        });
        assert!(!matched);
        assert_eq!(set.len(), 1); // skipped, not dropped
    }

    #[test]
    fn unregister_self_during_visit() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 16));
        set.register(reg(1, BlockPos::new(2, 0, 0), 16));

        let actors = FakeActors::default();
        let mut visited = vec![];
        set.visit_in_range(Vec3::ZERO, &actors, |set, r, _| {
            visited.push(r.listener);
            if r.listener == ListenerId(0) {
                set.unregister(ListenerId(0));
            }
        });

        // Iteration saw both; the unregistration applied afterwards.
        assert_eq!(visited, vec![ListenerId(0), ListenerId(1)]);
        assert!(!set.contains(ListenerId(0)));
        assert!(set.contains(ListenerId(1)));
    }

    #[test]
    fn unregister_other_during_visit_skips_it() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 16));
        set.register(reg(1, BlockPos::new(2, 0, 0), 16));

        let actors = FakeActors::default();
        let mut visited = vec![];
        set.visit_in_range(Vec3::ZERO, &actors, |set, r, _| {
            visited.push(r.listener);
            // First visit tears down the not-yet-visited listener.
            set.unregister(ListenerId(1));
        });

        assert_eq!(visited, vec![ListenerId(0)]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn register_during_visit_defers_until_flush() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 16));

        let actors = FakeActors::default();
        let mut visits = 0;
        set.visit_in_range(Vec3::ZERO, &actors, |set, _, _| {
            visits += 1;
            set.register(reg(7, BlockPos::new(1, 0, 1), 16));
        });
        assert_eq!(visits, 1, "the in-flight visitation must not see the add");
        assert!(set.contains(ListenerId(7)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_then_readd_during_visit_ends_present() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 16));

        let actors = FakeActors::default();
        set.visit_in_range(Vec3::ZERO, &actors, |set, _, _| {
            set.unregister(ListenerId(0));
            set.register(reg(0, BlockPos::new(2, 0, 0), 16));
        });
        assert!(set.contains(ListenerId(0)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn reregister_replaces_entry() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 4));
        set.register(reg(0, BlockPos::new(1, 0, 0), 32));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn nested_visitation_flushes_only_at_outermost() {
        let mut set = ListenerSet::new();
        set.register(reg(0, BlockPos::new(1, 0, 0), 16));

        let actors = FakeActors::default();
        set.visit_in_range(Vec3::ZERO, &actors, |set, _, _| {
            // Reentrant visitation from inside a visitor callback.
            set.visit_in_range(Vec3::ZERO, &FakeActors::default(), |set, _, _| {
                set.unregister(ListenerId(0));
            });
            // The inner visitation completing must not have flushed.
            assert!(set.contains(ListenerId(0)));
        });
        assert!(!set.contains(ListenerId(0)));
        assert!(!set.is_processing());
    }
}

// ── SectionGrid ───────────────────────────────────────────────────────────────

mod grid {
    use super::*;

    #[test]
    fn register_into_unloaded_column_is_a_skip() {
        let mut grid = SectionGrid::new();
        assert!(grid.section_or_create(SectionPos::new(0, 0, 0)).is_none());

        grid.load(ColumnPos::new(0, 0));
        assert!(grid.section_or_create(SectionPos::new(0, 0, 0)).is_some());
        assert!(grid.section_or_create(SectionPos::new(0, 4, 0)).is_some());
        // Same column, any y.
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 2);
    }

    #[test]
    fn section_mut_does_not_create() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));
        assert!(grid.section_mut(SectionPos::new(0, 0, 0)).is_none());
    }

    #[test]
    fn unload_drops_registries() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(1, 1));
        let set = grid.section_or_create(SectionPos::new(1, 0, 1)).unwrap();
        set.register(reg(0, BlockPos::new(20, 5, 20), 8));

        assert!(grid.unload(ColumnPos::new(1, 1)));
        assert!(!grid.is_loaded(ColumnPos::new(1, 1)));
        assert!(grid.section_mut(SectionPos::new(1, 0, 1)).is_none());
    }

    #[test]
    fn empty_registry_is_reclaimed_on_unregister() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));
        let section = SectionPos::new(0, 2, 0);
        grid.section_or_create(section)
            .unwrap()
            .register(reg(3, BlockPos::new(1, 33, 1), 8));
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 1);

        grid.unregister(section, ListenerId(3));
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 0);
    }
}

// ── MembershipTracker ─────────────────────────────────────────────────────────

mod tracker {
    use super::*;

    fn actor_reg(id: u32, handle: ActorId, uuid: ActorUuid) -> Registration {
        Registration {
            listener: ListenerId(id),
            source: PositionSource::actor(handle, uuid, 0.0),
            radius: 16,
            mode: DeliveryMode::ByDistance,
        }
    }

    #[test]
    fn add_homes_listener_in_its_cell() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));

        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(1), uuid, Vec3::new(8.0, 40.0, 8.0));

        let r = actor_reg(0, ActorId(1), uuid);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &actors);

        assert_eq!(tracker.last_section(), Some(SectionPos::new(0, 2, 0)));
        assert!(grid
            .section_mut(SectionPos::new(0, 2, 0))
            .unwrap()
            .contains(ListenerId(0)));
    }

    #[test]
    fn move_within_cell_is_a_noop() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));

        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(1), uuid, Vec3::new(1.0, 1.0, 1.0));

        let r = actor_reg(0, ActorId(1), uuid);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &actors);

        actors.place(ActorId(1), Vec3::new(14.0, 14.0, 14.0)); // still section (0,0,0)
        tracker.update(&mut grid, &r, &actors);
        assert_eq!(tracker.last_section(), Some(SectionPos::new(0, 0, 0)));
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 1);
    }

    #[test]
    fn move_across_cells_rehomes() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));
        grid.load(ColumnPos::new(2, 0));

        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(1), uuid, Vec3::new(1.0, 1.0, 1.0));

        let r = actor_reg(0, ActorId(1), uuid);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &actors);

        actors.place(ActorId(1), Vec3::new(40.0, 1.0, 1.0)); // section (2,0,0)
        tracker.update(&mut grid, &r, &actors);

        assert_eq!(tracker.last_section(), Some(SectionPos::new(2, 0, 0)));
        // Old registry reclaimed, new one populated.
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 0);
        assert!(grid
            .section_mut(SectionPos::new(2, 0, 0))
            .unwrap()
            .contains(ListenerId(0)));
    }

    #[test]
    fn transient_resolution_failure_never_deregisters() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));

        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(1), uuid, Vec3::new(1.0, 1.0, 1.0));

        let r = actor_reg(0, ActorId(1), uuid);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &actors);

        actors.despawn(ActorId(1)); // briefly unloaded
        tracker.update(&mut grid, &r, &actors);

        assert_eq!(tracker.last_section(), Some(SectionPos::new(0, 0, 0)));
        assert!(grid
            .section_mut(SectionPos::new(0, 0, 0))
            .unwrap()
            .contains(ListenerId(0)));
    }

    #[test]
    fn move_into_unloaded_column_skips_registration() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));

        let mut actors = FakeActors::default();
        let uuid = ActorUuid::new_v4();
        actors.spawn(ActorId(1), uuid, Vec3::new(1.0, 1.0, 1.0));

        let r = actor_reg(0, ActorId(1), uuid);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &actors);

        actors.place(ActorId(1), Vec3::new(100.0, 1.0, 1.0)); // column (6,0): unloaded
        tracker.update(&mut grid, &r, &actors);

        // Removed from the old cell; the new cell's storage doesn't exist,
        // so registration is skipped (not an error).
        assert_eq!(tracker.last_section(), Some(SectionPos::new(6, 0, 0)));
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 0);
    }

    #[test]
    fn remove_clears_home() {
        let mut grid = SectionGrid::new();
        grid.load(ColumnPos::new(0, 0));

        let r = reg(0, BlockPos::new(1, 1, 1), 8);
        let mut tracker = MembershipTracker::new(ListenerId(0));
        tracker.add(&mut grid, &r, &FakeActors::default());
        assert!(tracker.last_section().is_some());

        tracker.remove(&mut grid);
        assert_eq!(tracker.last_section(), None);
        assert_eq!(grid.section_count(ColumnPos::new(0, 0)), 0);
    }
}

// ── Voxel ray traversal ───────────────────────────────────────────────────────

mod ray {
    use super::*;
    use crate::block_line_clear;

    #[test]
    fn open_line_is_clear() {
        let walls = Walls::default();
        assert!(block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(10.5, 0.5, 0.5),
            &walls
        ));
    }

    #[test]
    fn wall_blocks_axis_aligned_line() {
        let walls = Walls::with([BlockPos::new(5, 0, 0)]);
        assert!(!block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(10.5, 0.5, 0.5),
            &walls
        ));
    }

    #[test]
    fn destination_voxel_is_not_tested() {
        let walls = Walls::with([BlockPos::new(10, 0, 0)]);
        assert!(block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(10.5, 0.5, 0.5),
            &walls
        ));
    }

    #[test]
    fn start_voxel_is_tested() {
        let walls = Walls::with([BlockPos::new(0, 0, 0)]);
        assert!(!block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(10.5, 0.5, 0.5),
            &walls
        ));
    }

    #[test]
    fn zero_length_line_is_clear() {
        let walls = Walls::with([BlockPos::new(0, 0, 0)]);
        // Same voxel for start and end — nothing between them.
        assert!(block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.9, 0.5, 0.5),
            &walls
        ));
    }

    #[test]
    fn diagonal_line_hits_wall() {
        let walls = Walls::with([BlockPos::new(3, 3, 3)]);
        assert!(!block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(6.5, 6.5, 6.5),
            &walls
        ));
    }

    #[test]
    fn diagonal_line_around_wall_is_clear() {
        // Wall off the diagonal — must not be hit.
        let walls = Walls::with([BlockPos::new(3, 0, 3)]);
        assert!(block_line_clear(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(6.5, 6.5, 6.5),
            &walls
        ));
    }

    #[test]
    fn negative_coordinates() {
        let walls = Walls::with([BlockPos::new(-5, 0, 0)]);
        assert!(!block_line_clear(
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-10.5, 0.5, 0.5),
            &walls
        ));
        assert!(block_line_clear(
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-4.5, 0.5, 0.5),
            &walls
        ));
    }
}
