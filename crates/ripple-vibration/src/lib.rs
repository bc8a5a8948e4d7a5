//! `ripple-vibration` — delayed, occludable event delivery to receivers.
//!
//! This is the top layer of the framework: it wires the dispatcher's
//! nearest-first fan-out into per-receiver channels, arbitrates among
//! same-tick candidates, counts down travel time, and finally invokes the
//! receiver's delivery callback.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`receiver`] | `VibrationReceiver` — the capability trait receivers implement |
//! | [`info`]     | `VibrationInfo` — the immutable propagated-event record  |
//! | [`gate`]     | acceptance gate and the six-probe occlusion test         |
//! | [`selector`] | candidate buffering and pluggable `ArbitrationPolicy`    |
//! | [`channel`]  | `ReceiverChannel` — at-most-one-in-flight state + persistence |
//! | [`feedback`] | `SignalPayload` — the wire-level animation broadcast     |
//! | [`world`]    | `VibrationWorld` — everything the ticker needs from the engine |
//! | [`ticker`]   | the per-tick Idle → Traveling → Arrived state machine    |
//! | [`store`]    | `ReceiverStore` — slot storage for receivers             |
//! | [`system`]   | `VibrationSystem` — the facade tying it all together     |
//!
//! # Concurrency
//!
//! Single-threaded, cooperative: dispatch, registry mutation, and ticking
//! all happen on the simulation step.  Receiver trait objects therefore
//! carry no `Send`/`Sync` bounds.

pub mod channel;
pub mod feedback;
pub mod gate;
pub mod info;
pub mod receiver;
pub mod selector;
pub mod store;
pub mod system;
pub mod ticker;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use channel::ReceiverChannel;
pub use feedback::SignalPayload;
pub use gate::is_occluded;
pub use info::VibrationInfo;
pub use receiver::VibrationReceiver;
pub use selector::{ArbitrationPolicy, Candidate, MostRecentWins, NearestWins, Selector};
pub use store::{ReceiverSlot, ReceiverStore};
pub use system::VibrationSystem;
pub use world::VibrationWorld;
