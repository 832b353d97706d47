use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three cartesian axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Read the component of `v` along this axis.
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Mutable access to the component of `v` along this axis.
    pub fn get_mut(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }

    /// The axis along which `delta` has the largest magnitude.
    ///
    /// Ties resolve in X, Y, Z order.
    pub fn dominant(delta: Vec3) -> Axis {
        let a = delta.abs();
        if a.x >= a.y && a.x >= a.z {
            Axis::X
        } else if a.y >= a.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Spatial transform with Euler rotation in radians.
///
/// Rotation is applied X, then Y, then Z when composed into a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerTransform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl EulerTransform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }
}

impl Default for EulerTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = EulerTransform::default();
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn axis_get_mut_writes_one_component() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        *Axis::Y.get_mut(&mut v) += 10.0;
        assert_eq!(v, Vec3::new(1.0, 12.0, 3.0));
        assert_eq!(Axis::Z.get(v), 3.0);
    }

    #[test]
    fn dominant_axis_of_edge() {
        assert_eq!(Axis::dominant(Vec3::new(0.0, 200.0, 0.0)), Axis::Y);
        assert_eq!(Axis::dominant(Vec3::new(-200.0, 0.0, 0.0)), Axis::X);
        assert_eq!(Axis::dominant(Vec3::new(0.0, 0.0, -1.0)), Axis::Z);
    }
}
