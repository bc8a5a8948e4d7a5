//! `ripple-core` — foundational types for the ripple event-propagation
//! framework.
//!
//! This crate is a dependency of every other `ripple-*` crate.  It
//! intentionally has no `ripple-*` dependencies and minimal external ones
//! (only `thiserror` and `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `ListenerId`, `ActorId`, `EventTag`, `MaterialId`         |
//! | [`pos`]    | `Vec3`, `BlockPos`, `SectionPos`, `ColumnPos`             |
//! | [`event`]  | `Event`, `EventContext`                                   |
//! | [`source`] | `PositionSource` (fixed or actor-relative, maybe-resolvable) |
//! | [`view`]   | `ActorView`, `BlockView` world-capability traits          |
//! | [`tick`]   | `Tick` counter                                            |
//! | [`error`]  | `RippleError`, `RippleResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                                       |
//! |---------|------------------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types; required by `ripple-vibration`. |

pub mod error;
pub mod event;
pub mod ids;
pub mod pos;
pub mod source;
pub mod tick;
pub mod view;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RippleError, RippleResult};
pub use event::{Event, EventContext};
pub use ids::{ActorId, ActorUuid, EventTag, ListenerId, MaterialId};
pub use pos::{BlockPos, ColumnPos, SectionPos, Vec3};
pub use source::PositionSource;
pub use tick::Tick;
pub use view::{ActorView, BlockView};
