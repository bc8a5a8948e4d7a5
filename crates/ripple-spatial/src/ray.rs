//! Voxel line traversal (Amanatides–Woo), used for occlusion probes.
//!
//! Walks every voxel a segment passes through, in order, by repeatedly
//! stepping across the nearest grid boundary.  Exact for axis-aligned and
//! diagonal segments alike — no sampling, no missed corner voxels.

use ripple_core::{BlockPos, BlockView, Vec3};

/// `true` iff the segment `from → to` reaches the destination voxel without
/// passing through any occlusion-classified voxel.
///
/// The starting voxel *is* tested (a probe that begins inside a wall is
/// blocked); the destination voxel is *not* (a receiver must not occlude
/// itself).
pub fn block_line_clear<B: BlockView>(from: Vec3, to: Vec3, view: &B) -> bool {
    let end = BlockPos::containing(to);
    let mut cur = BlockPos::containing(from);
    if cur == end {
        return true;
    }
    if view.is_occluding(cur) {
        return false;
    }

    let d = to - from;
    let (step_x, mut t_max_x, t_delta_x) = axis_setup(from.x, cur.x, d.x);
    let (step_y, mut t_max_y, t_delta_y) = axis_setup(from.y, cur.y, d.y);
    let (step_z, mut t_max_z, t_delta_z) = axis_setup(from.z, cur.z, d.z);

    // The walk visits at most one voxel per axis-boundary crossing; the
    // manhattan span bounds it, with slack for boundary-start edge cases.
    let max_steps =
        (end.x - cur.x).abs() + (end.y - cur.y).abs() + (end.z - cur.z).abs() + 3;

    for _ in 0..max_steps {
        // Step across the nearest boundary.
        if t_max_x <= t_max_y && t_max_x <= t_max_z {
            if t_max_x > 1.0 {
                return true; // segment ends before the next boundary
            }
            cur.x += step_x;
            t_max_x += t_delta_x;
        } else if t_max_y <= t_max_z {
            if t_max_y > 1.0 {
                return true;
            }
            cur.y += step_y;
            t_max_y += t_delta_y;
        } else {
            if t_max_z > 1.0 {
                return true;
            }
            cur.z += step_z;
            t_max_z += t_delta_z;
        }

        if cur == end {
            return true;
        }
        if view.is_occluding(cur) {
            return false;
        }
    }
    true
}

/// Per-axis DDA setup: step direction, parametric distance to the first
/// boundary crossing, and parametric distance per subsequent crossing.
/// A zero component never crosses its axis (`t = ∞`).
fn axis_setup(origin: f64, cell: i32, delta: f64) -> (i32, f64, f64) {
    if delta > 0.0 {
        let first = (f64::from(cell) + 1.0 - origin) / delta;
        (1, first, 1.0 / delta)
    } else if delta < 0.0 {
        let first = (f64::from(cell) - origin) / delta;
        (-1, first, -1.0 / delta)
    } else {
        (0, f64::INFINITY, f64::INFINITY)
    }
}
