use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::camera_path::CameraPath;
use crate::clock::{Clock, FrameTime};
use crate::config::{AnimationConfig, ConfigError};

/// Notable state changes produced while stepping the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A body reversed direction.
    SpeedFlipped {
        body: usize,
        at: f64,
        signed_speed: f32,
    },
    /// The camera arrived at a waypoint and turned onto the next edge.
    WaypointReached { index: usize, at: f64 },
}

/// The animated scene: two bodies, a patrolling camera, and the
/// configuration that gates them.
///
/// The driver loop calls [`Scene::frame`] once per display refresh. Control
/// changes made between calls take effect on the next frame.
#[derive(Debug, Clone)]
pub struct Scene {
    clock: Clock,
    bodies: [Body; 2],
    camera: CameraPath,
    config: AnimationConfig,
    frames: u64,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Build the default scene from a validated configuration.
    pub fn new(config: AnimationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: Clock::new(),
            bodies: Body::default_pair(config.object_period),
            camera: CameraPath::new(config.waypoints),
            config,
            frames: 0,
            event_log: Vec::new(),
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn set_animate_objects(&mut self, enabled: bool) {
        self.config.animate_objects = enabled;
    }

    pub fn set_animate_camera(&mut self, enabled: bool) {
        self.config.animate_camera = enabled;
    }

    /// Set the flip period of every body. Rejected values leave the scene
    /// unchanged.
    pub fn set_object_period(&mut self, period: f64) -> Result<(), ConfigError> {
        let candidate = AnimationConfig {
            object_period: period,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        for body in &mut self.bodies {
            body.motion.period = period;
        }
        Ok(())
    }

    /// Set the seconds the camera spends on each edge. Rejected values leave
    /// the scene unchanged.
    pub fn set_camera_period(&mut self, period: f64) -> Result<(), ConfigError> {
        let candidate = AnimationConfig {
            camera_period: period,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn camera(&self) -> &CameraPath {
        &self.camera
    }

    /// Wall time of the latest frame, in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Number of frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Step bodies and camera for the frame stamped `timestamp_ms`.
    pub fn frame(&mut self, timestamp_ms: f64) -> FrameTime {
        let _span = tracing::info_span!("frame", n = self.frames).entered();
        let time = self.clock.tick(timestamp_ms);

        let animate_objects = self.config.animate_objects;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.advance(time, animate_objects) {
                let signed_speed = body.motion.signed_speed;
                tracing::debug!(body = index, at = time.now, signed_speed, "body reversed");
                self.event_log.push(SceneEvent::SpeedFlipped {
                    body: index,
                    at: time.now,
                    signed_speed,
                });
            }
        }

        if let Some(index) = self.camera.advance(
            time.delta,
            self.config.camera_period,
            self.config.animate_camera,
        ) {
            self.event_log
                .push(SceneEvent::WaypointReached { index, at: time.now });
        }

        self.frames += 1;
        tracing::trace!(now = time.now, delta = time.delta, "frame stepped");
        time
    }
}
