//! `ripple-dispatch` — fans one posted event out to every listener in range.
//!
//! The dispatcher walks only the cell registries covered by the event's
//! notification radius (never the whole world), visits each one, and hands
//! matched listeners to the caller's delivery sink — synchronously for
//! immediate-mode listeners, in ascending-distance order for by-distance
//! listeners.
//!
//! Nearest-first delivery is what makes nearest-wins receiver arbitration
//! implementable: the policy belongs to the receiver, the ordering guarantee
//! belongs here.

pub mod dispatcher;


pub use dispatcher::Dispatcher;
