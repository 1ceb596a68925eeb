//! World state and input.
//!
//! Modules:
//! - `maze`: tile map loading and validation
//! - `player`: pose, movement intent and player settings
//! - `process_events`: keyboard input and occupancy-checked movement

pub mod maze;
pub mod player;
pub mod process_events;
