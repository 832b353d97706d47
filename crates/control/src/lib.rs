//! Control surface: panel edits expressed as actions and applied at frame
//! boundaries.
//!
//! # Invariants
//! - Actions never run mid-frame; a queue is drained between frames.
//! - Every numeric edit is clamped into the range its panel slider allows.

pub mod action;

pub use action::{ControlAction, ControlError, ControlQueue, Range, Toggle, TransformPart};
