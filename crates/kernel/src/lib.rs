//! Scene kernel: clock, oscillating bodies, camera patrol, per-frame stepping.
//!
//! # Invariants
//! - Stepping is pure arithmetic over the scene state and the frame timestamp.
//! - Configuration changes are read once per frame, at the frame boundary.
//! - The camera's next waypoint is always `(current + 1) % 4`.

pub mod body;
pub mod camera_path;
pub mod clock;
pub mod config;
pub mod scene;

pub use body::{Body, Oscillation};
pub use camera_path::CameraPath;
pub use clock::{Clock, FrameTime};
pub use config::{AnimationConfig, ConfigError};
pub use scene::{Scene, SceneEvent};
