//! Real-time card duel between two combatants.
//!
//! The combat core in [`game`] is plain Rust driven by elapsed-time deltas;
//! [`game::plugin`] wraps it in Bevy resources, messages and systems.

pub mod game;
