//! Session state machine
//!
//! Screens: menu, name entry, play, pause, game over, high scores.
//! Transitions are planned by `mode::plan` and applied by `Session`.

pub mod machine;
pub mod mode;
pub mod name_entry;

pub use machine::{Notice, Session};
pub use mode::{Effect, Flags, Mode, NameStage, SessionEvent, Transition, plan};
pub use name_entry::NameBuffer;
