use glam::{Mat4, Vec4};
use primscene_kernel::Scene;
use serde::{Deserialize, Serialize};

use crate::appearance::{Appearance, Primitive};
use crate::transform::{Projection, RenderView, compute_matrix};

/// One draw call: mesh, object matrix, colour multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub primitive: Primitive,
    pub matrix: Mat4,
    pub color_mult: Vec4,
}

/// Everything the backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub frame: u64,
    pub time: f64,
    pub view: RenderView,
    pub view_projection: Mat4,
    pub items: Vec<DrawItem>,
}

impl FrameOutput {
    /// Compose the draw list for the scene's current state.
    ///
    /// Bodies pair with appearances by index; extra entries on either side
    /// are ignored.
    pub fn build(scene: &Scene, appearances: &[Appearance], projection: &Projection) -> Self {
        let view = RenderView::for_scene(scene);
        let view_projection = view.view_projection(projection);
        let items = scene
            .bodies()
            .iter()
            .zip(appearances)
            .map(|(body, appearance)| {
                let t = &body.transform;
                DrawItem {
                    primitive: appearance.primitive,
                    matrix: compute_matrix(view_projection, t.translation, t.rotation, t.scale),
                    color_mult: appearance.color_mult,
                }
            })
            .collect();
        Self {
            frame: scene.frame_count(),
            time: scene.now(),
            view,
            view_projection,
            items,
        }
    }
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A backend owns its meshes and shader programs and turns a [`FrameOutput`]
/// into draw calls. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameOutput) -> Self::Output;
}

/// Headless renderer producing a human-readable frame summary.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameOutput) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (t={:.3}s) ===\n",
            frame.frame, frame.time
        ));
        let v = &frame.view;
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) up=({:.1}, {:.1}, {:.1})\n",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.up.x, v.up.y, v.up.z
        ));

        for (i, item) in frame.items.iter().enumerate() {
            let w = item.matrix.w_axis;
            let c = item.color_mult;
            out.push_str(&format!(
                "  [{i}] {:<6} clip=({:.2}, {:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2}, {:.2})\n",
                item.primitive.name(),
                w.x,
                w.y,
                w.z,
                w.w,
                c.x,
                c.y,
                c.z,
                c.w
            ));
        }

        out
    }
}
