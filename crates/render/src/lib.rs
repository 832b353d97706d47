//! Rendering adapter: turns scene state into per-object matrices and colours.
//!
//! # Invariants
//! - Renderer cannot mutate scene state.
//! - Object matrices compose as view-projection · T · Rx · Ry · Rz · S.
//!
//! GPU work (shaders, buffers, vertex arrays) belongs to the backend behind
//! the [`Renderer`] trait. [`DebugTextRenderer`] is the headless backend.

mod appearance;
mod renderer;
mod transform;

pub use appearance::{Appearance, Primitive, SceneRng, emod, hsv_to_rgba};
pub use renderer::{DebugTextRenderer, DrawItem, FrameOutput, Renderer};
pub use transform::{Projection, RenderView, compute_matrix};
