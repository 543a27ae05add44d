//! Platform abstraction layer
//!
//! The window layer hands the game two things each frame:
//! - Discrete key presses (`Key`), dispatched by the session
//! - Held-key state (`TickInput`), sampled by the simulation

pub mod input;

pub use input::{HeldKeys, Key};
