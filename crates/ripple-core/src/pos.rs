//! Position types and block/cell coordinate conversions.
//!
//! Three coordinate spaces coexist:
//!
//! - **point space** ([`Vec3`], f64) — exact positions of actors and event
//!   origins;
//! - **block space** ([`BlockPos`], i32) — the unit voxel grid used for
//!   occlusion tests;
//! - **cell space** ([`SectionPos`] / [`ColumnPos`], i32) — the 16-block
//!   partition grid used for listener indexing and load tracking.
//!
//! Conversions always floor, so negative coordinates map correctly
//! (`-0.5 → block -1 → section -1`).

use std::fmt;
use std::ops::{Add, Sub};

/// Side length of one spatial cell, in blocks.
pub const SECTION_SIZE: i32 = 16;

const SECTION_SHIFT: i32 = 4;

// ── Vec3 ─────────────────────────────────────────────────────────────────────

/// An exact point in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared euclidean distance — cheap radius gating without a sqrt.
    #[inline]
    pub fn distance_sq(self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Linear interpolation from `self` toward `other` by `t` in `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f64) -> Vec3 {
        Vec3 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Copy of `self` shifted vertically by `dy`.
    #[inline]
    pub fn offset_y(self, dy: f64) -> Vec3 {
        Vec3 { y: self.y + dy, ..self }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── BlockPos ─────────────────────────────────────────────────────────────────

/// An integer voxel coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The voxel containing `point` (component-wise floor).
    #[inline]
    pub fn containing(point: Vec3) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    /// Exact center of this voxel.
    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f64 + 0.5, self.y as f64 + 0.5, self.z as f64 + 0.5)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ── SectionPos ───────────────────────────────────────────────────────────────

/// A cell coordinate in the 16-block partition grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SectionPos {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing `block`.  Arithmetic shift keeps negative
    /// coordinates correct (block -1 → section -1).
    #[inline]
    pub fn of_block(block: BlockPos) -> Self {
        Self {
            x: block.x >> SECTION_SHIFT,
            y: block.y >> SECTION_SHIFT,
            z: block.z >> SECTION_SHIFT,
        }
    }

    /// The cell containing `point`.
    #[inline]
    pub fn of_point(point: Vec3) -> Self {
        Self::of_block(BlockPos::containing(point))
    }

    /// The loadable partition column this cell belongs to.
    #[inline]
    pub fn column(self) -> ColumnPos {
        ColumnPos { x: self.x, z: self.z }
    }
}

impl fmt::Display for SectionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ── ColumnPos ────────────────────────────────────────────────────────────────

/// The x/z coordinate of a loadable partition column.  All vertical cells
/// sharing an x/z pair load and unload together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    #[inline]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ColumnPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column[{}, {}]", self.x, self.z)
    }
}
