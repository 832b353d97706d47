use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera_path::CameraPath;

/// Errors from loading or validating an [`AnimationConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("object period must be a finite, non-negative number of seconds, got {0}")]
    InvalidObjectPeriod(f64),
    #[error("camera period must be a finite, positive number of seconds, got {0}")]
    InvalidCameraPeriod(f64),
    #[error("waypoint {index} is not finite: {point}")]
    NonFiniteWaypoint { index: usize, point: Vec3 },
    #[error("camera edge {from} -> {to} is not axis-aligned")]
    SkewedEdge { from: usize, to: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Animation toggles and timing, shared between the control surface and the
/// frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub animate_objects: bool,
    pub animate_camera: bool,
    /// Seconds between body direction flips.
    pub object_period: f64,
    /// Seconds the camera takes to travel one edge of its path.
    pub camera_period: f64,
    /// Corners of the camera patrol.
    pub waypoints: [Vec3; 4],
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animate_objects: false,
            animate_camera: false,
            object_period: 5.0,
            camera_period: 10.0,
            waypoints: CameraPath::DEFAULT_WAYPOINTS,
        }
    }
}

impl AnimationConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the frame loop cannot step with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.object_period.is_finite() || self.object_period < 0.0 {
            return Err(ConfigError::InvalidObjectPeriod(self.object_period));
        }
        if !self.camera_period.is_finite() || self.camera_period <= 0.0 {
            return Err(ConfigError::InvalidCameraPeriod(self.camera_period));
        }
        for (index, point) in self.waypoints.iter().enumerate() {
            if !point.is_finite() {
                return Err(ConfigError::NonFiniteWaypoint {
                    index,
                    point: *point,
                });
            }
        }
        let n = self.waypoints.len();
        for from in 0..n {
            let to = (from + 1) % n;
            let delta = self.waypoints[to] - self.waypoints[from];
            let moving_axes = delta.to_array().iter().filter(|c| **c != 0.0).count();
            if moving_axes > 1 {
                return Err(ConfigError::SkewedEdge { from, to });
            }
        }
        Ok(())
    }
}
