//! Shared types for the primscene workspace.

pub mod types;

pub use types::{Axis, EulerTransform};
