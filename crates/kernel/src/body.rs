use glam::Vec3;
use primscene_common::{Axis, EulerTransform};
use serde::{Deserialize, Serialize};

use crate::clock::FrameTime;

/// Back-and-forth motion parameters for one body.
///
/// The sign of `signed_speed` flips whenever more than `period` seconds of
/// wall time have passed since the last flip. Distance travelled plays no
/// part, so uneven frame times make the motion drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Units per second along `translation_axis`; sign is the direction.
    pub signed_speed: f32,
    /// Radians per second around `rotation_axis`.
    pub rotation_speed: f32,
    /// Seconds between direction flips.
    pub period: f64,
    /// Wall time of the last flip.
    pub last_flip: f64,
    pub translation_axis: Axis,
    pub rotation_axis: Axis,
}

impl Oscillation {
    /// Oscillate along and spin around the same axis, starting at time 0.
    pub fn along(axis: Axis, speed: f32, rotation_speed: f32, period: f64) -> Self {
        Self {
            signed_speed: speed,
            rotation_speed,
            period,
            last_flip: 0.0,
            translation_axis: axis,
            rotation_axis: axis,
        }
    }
}

/// An animated object: its transform plus the motion that drives it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub transform: EulerTransform,
    pub motion: Oscillation,
}

impl Body {
    pub fn new(transform: EulerTransform, motion: Oscillation) -> Self {
        Self { transform, motion }
    }

    /// The two bodies of the default scene.
    ///
    /// Body 0 slides and spins along X from x = 30; body 1 along Y from
    /// x = -40.
    pub fn default_pair(period: f64) -> [Body; 2] {
        [
            Body::new(
                EulerTransform::at(Vec3::new(30.0, 0.0, 0.0)),
                Oscillation::along(Axis::X, 10.0, 5.0, period),
            ),
            Body::new(
                EulerTransform::at(Vec3::new(-40.0, 0.0, 0.0)),
                Oscillation::along(Axis::Y, 10.0, 5.0, period),
            ),
        ]
    }

    /// Integrate one frame of motion. Returns true if the direction flipped.
    ///
    /// Disabled frames leave the body untouched, including `last_flip`, so a
    /// body enabled late in the run flips on its first frame.
    pub fn advance(&mut self, time: FrameTime, enabled: bool) -> bool {
        if !enabled {
            return false;
        }

        let motion = &mut self.motion;
        let flipped = time.now - motion.last_flip > motion.period;
        if flipped {
            motion.signed_speed = -motion.signed_speed;
            motion.last_flip = time.now;
        }

        let dt = time.delta as f32;
        *motion.translation_axis.get_mut(&mut self.transform.translation) +=
            motion.signed_speed * dt;
        *motion.rotation_axis.get_mut(&mut self.transform.rotation) += motion.rotation_speed * dt;

        flipped
    }
}
