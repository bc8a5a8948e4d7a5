//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into slot `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.
//!
//! Live IDs (`ActorId`, `ListenerId`) are handles into the running
//! simulation and are never persisted; the stable identity that crosses the
//! save boundary is [`ActorUuid`].

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Handle of a registered event listener / receiver.
    pub struct ListenerId(u32);
}

typed_id! {
    /// Live numeric handle of a simulated actor.  Valid only while the actor
    /// is loaded; use [`ActorUuid`] for identity that must survive a save.
    pub struct ActorId(u32);
}

typed_id! {
    /// Index of an event kind in the application's event catalog.
    /// Using `u16` keeps event records compact (max 65,535 event kinds).
    pub struct EventTag(u16);
}

typed_id! {
    /// Index of a material / block-state kind in the application's registry.
    pub struct MaterialId(u32);
}

/// Stable actor identity, preserved across save/load and actor reloads.
pub type ActorUuid = uuid::Uuid;
