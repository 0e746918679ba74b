//! State engine
//!
//! Turns the tailer's line stream into a single [`PlayerState`]. Each line is
//! classified by [`classify`], applied to the engine's working state, then
//! published to readers through a [`PlayerStateHandle`] and announced to any
//! registered [`SignalHandler`]s as a [`GameSignal`].

mod classify;
mod processor;
mod signal;
mod state;

#[cfg(test)]
mod engine_tests;

pub use classify::{LogEvent, classify};
pub use processor::StateEngine;
pub use signal::{GameSignal, SignalHandler};
pub use state::{Corpse, PlayerState, PlayerStateHandle};
