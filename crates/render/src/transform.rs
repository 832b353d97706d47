use glam::{Mat4, Vec3};
use primscene_kernel::{CameraPath, Scene};
use serde::{Deserialize, Serialize};

/// Compose an object's matrix against the view-projection.
///
/// Order is fixed: translate, rotate X, rotate Y, rotate Z, scale.
/// Rotation angles are radians.
pub fn compute_matrix(
    view_projection: Mat4,
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
) -> Mat4 {
    view_projection
        * Mat4::from_translation(translation)
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
        * Mat4::from_scale(scale)
}

/// Perspective projection in GL clip space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_radians: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 2000.0,
        }
    }
}

impl Projection {
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_radians, self.aspect, self.near, self.far)
    }
}

/// Camera placement handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 100.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl RenderView {
    /// Look at the origin from the patrolling camera, with up along the
    /// normal of the patrol plane.
    pub fn from_camera(camera: &CameraPath) -> Self {
        Self {
            eye: camera.position(),
            target: Vec3::ZERO,
            up: camera.plane_normal(),
        }
    }

    /// The patrol view while the camera animates, the fixed default view
    /// otherwise.
    pub fn for_scene(scene: &Scene) -> Self {
        if scene.config().animate_camera {
            Self::from_camera(scene.camera())
        } else {
            Self::default()
        }
    }

    /// Look-at matrix. An `up` parallel to the view direction is replaced
    /// by an orthogonal one; an eye on the target looks down -Z.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.eye).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Mat4::look_to_rh(self.eye, Vec3::NEG_Z, Vec3::Y);
        }
        let up = if forward.cross(self.up).length_squared() < 1e-12 {
            forward.any_orthonormal_vector()
        } else {
            self.up
        };
        Mat4::look_to_rh(self.eye, forward, up)
    }

    pub fn view_projection(&self, projection: &Projection) -> Mat4 {
        projection.matrix() * self.view_matrix()
    }
}
