use std::str::FromStr;

use primscene_common::Axis;
use primscene_kernel::{ConfigError, Scene};

/// Inclusive bounds of a panel slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const TRANSLATION: Range = Range::new(-50.0, 50.0);
    pub const ROTATION: Range = Range::new(-50.0, 50.0);
    pub const SCALE: Range = Range::new(1.0, 50.0);
    pub const OBJECT_PERIOD: Range = Range::new(0.0, 10.0);
    pub const CAMERA_PERIOD: Range = Range::new(0.1, 60.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range. NaN lands on `min`.
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// How a boolean switch should change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    Flip,
}

impl Toggle {
    fn resolve(self, current: bool) -> bool {
        match self {
            Toggle::On => true,
            Toggle::Off => false,
            Toggle::Flip => !current,
        }
    }
}

/// Which part of a body's transform a slider edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPart {
    Translation,
    Rotation,
    Scale,
}

impl TransformPart {
    fn range(self) -> Range {
        match self {
            TransformPart::Translation => Range::TRANSLATION,
            TransformPart::Rotation => Range::ROTATION,
            TransformPart::Scale => Range::SCALE,
        }
    }
}

/// An edit made on the control surface.
///
/// The frame loop consumes actions, never raw widget events, so any panel
/// implementation drives the same scene logic.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    /// Switch body animation.
    AnimateObjects(Toggle),
    /// Switch camera patrol.
    AnimateCamera(Toggle),
    /// Set the flip period of every body.
    ObjectPeriod(f64),
    /// Set the time the camera spends on each edge.
    CameraPeriod(f64),
    /// Set the flip period of one body.
    BodyPeriod { body: usize, period: f64 },
    /// Set one component of a body's transform.
    SetTransform {
        body: usize,
        part: TransformPart,
        axis: Axis,
        value: f32,
    },
}

/// Errors from applying or parsing control actions.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("no body with index {0}")]
    UnknownBody(usize),
    #[error("cannot parse control action {input:?}: {reason}")]
    Parse { input: String, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ControlAction {
    /// Apply the action to the scene, clamping values into slider range.
    pub fn apply(&self, scene: &mut Scene) -> Result<(), ControlError> {
        match *self {
            ControlAction::AnimateObjects(toggle) => {
                let enabled = toggle.resolve(scene.config().animate_objects);
                scene.set_animate_objects(enabled);
            }
            ControlAction::AnimateCamera(toggle) => {
                let enabled = toggle.resolve(scene.config().animate_camera);
                scene.set_animate_camera(enabled);
            }
            ControlAction::ObjectPeriod(period) => {
                scene.set_object_period(Range::OBJECT_PERIOD.clamp(period))?;
            }
            ControlAction::CameraPeriod(period) => {
                scene.set_camera_period(Range::CAMERA_PERIOD.clamp(period))?;
            }
            ControlAction::BodyPeriod { body, period } => {
                let target = scene
                    .body_mut(body)
                    .ok_or(ControlError::UnknownBody(body))?;
                target.motion.period = Range::OBJECT_PERIOD.clamp(period);
            }
            ControlAction::SetTransform {
                body,
                part,
                axis,
                value,
            } => {
                let target = scene
                    .body_mut(body)
                    .ok_or(ControlError::UnknownBody(body))?;
                let value = part.range().clamp(value as f64) as f32;
                let transform = &mut target.transform;
                let v = match part {
                    TransformPart::Translation => &mut transform.translation,
                    TransformPart::Rotation => &mut transform.rotation,
                    TransformPart::Scale => &mut transform.scale,
                };
                *axis.get_mut(v) = value;
            }
        }
        tracing::debug!(action = ?self, "control action applied");
        Ok(())
    }
}

fn parse_error(input: &str, reason: impl Into<String>) -> ControlError {
    ControlError::Parse {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T: FromStr>(input: &str, value: &str) -> Result<T, ControlError> {
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(input, format!("{value:?} is not a number")))
}

fn parse_toggle(input: &str, value: &str) -> Result<Toggle, ControlError> {
    match value.trim() {
        "on" | "true" => Ok(Toggle::On),
        "off" | "false" => Ok(Toggle::Off),
        "toggle" => Ok(Toggle::Flip),
        other => Err(parse_error(
            input,
            format!("expected on, off or toggle, got {other:?}"),
        )),
    }
}

fn parse_axis(input: &str, value: &str) -> Result<Axis, ControlError> {
    match value {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        other => Err(parse_error(input, format!("unknown axis {other:?}"))),
    }
}

/// Parses `key=value` edits:
///
/// ```text
/// objects=on|off|toggle          camera=on|off|toggle
/// object-period=3                camera-period=8
/// body1.period=2                 body0.translation.y=-20
/// body0.rotation.z=1.5           body1.scale.x=4
/// ```
impl FromStr for ControlAction {
    type Err = ControlError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| parse_error(input, "expected key=value"))?;
        let key = key.trim();

        match key {
            "objects" => return Ok(ControlAction::AnimateObjects(parse_toggle(input, value)?)),
            "camera" => return Ok(ControlAction::AnimateCamera(parse_toggle(input, value)?)),
            "object-period" => return Ok(ControlAction::ObjectPeriod(parse_number(input, value)?)),
            "camera-period" => return Ok(ControlAction::CameraPeriod(parse_number(input, value)?)),
            _ => {}
        }

        let rest = key
            .strip_prefix("body")
            .ok_or_else(|| parse_error(input, format!("unknown key {key:?}")))?;
        let mut path = rest.split('.');
        let body: usize = path
            .next()
            .and_then(|index| index.parse().ok())
            .ok_or_else(|| parse_error(input, "expected body<index>"))?;

        match (path.next(), path.next(), path.next()) {
            (Some("period"), None, None) => Ok(ControlAction::BodyPeriod {
                body,
                period: parse_number(input, value)?,
            }),
            (Some(part), Some(axis), None) => {
                let part = match part {
                    "translation" => TransformPart::Translation,
                    "rotation" => TransformPart::Rotation,
                    "scale" => TransformPart::Scale,
                    other => return Err(parse_error(input, format!("unknown property {other:?}"))),
                };
                Ok(ControlAction::SetTransform {
                    body,
                    part,
                    axis: parse_axis(input, axis)?,
                    value: parse_number(input, value)?,
                })
            }
            _ => Err(parse_error(input, format!("unknown key {key:?}"))),
        }
    }
}

/// Actions collected between frames, applied in arrival order.
#[derive(Debug, Default)]
pub struct ControlQueue {
    pending: Vec<ControlAction>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: ControlAction) {
        self.pending.push(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending action. Stops at the first failure; the failed
    /// action and those after it are discarded.
    pub fn apply_all(&mut self, scene: &mut Scene) -> Result<usize, ControlError> {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for action in &pending {
            action.apply(scene)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use primscene_kernel::AnimationConfig;

    fn scene() -> Scene {
        Scene::new(AnimationConfig::default()).unwrap()
    }

    #[test]
    fn toggles_switch_flags() {
        let mut s = scene();
        ControlAction::AnimateObjects(Toggle::Flip).apply(&mut s).unwrap();
        assert!(s.config().animate_objects);
        ControlAction::AnimateObjects(Toggle::Flip).apply(&mut s).unwrap();
        assert!(!s.config().animate_objects);
        ControlAction::AnimateCamera(Toggle::On).apply(&mut s).unwrap();
        assert!(s.config().animate_camera);
    }

    #[test]
    fn object_period_reaches_every_body() {
        let mut s = scene();
        ControlAction::ObjectPeriod(3.0).apply(&mut s).unwrap();
        assert_eq!(s.config().object_period, 3.0);
        assert!(s.bodies().iter().all(|b| b.motion.period == 3.0));
    }

    #[test]
    fn values_clamped_to_slider_range() {
        let mut s = scene();
        ControlAction::ObjectPeriod(-4.0).apply(&mut s).unwrap();
        assert_eq!(s.config().object_period, 0.0);
        ControlAction::CameraPeriod(0.0).apply(&mut s).unwrap();
        assert_eq!(s.config().camera_period, 0.1);
        ControlAction::SetTransform {
            body: 0,
            part: TransformPart::Scale,
            axis: Axis::Z,
            value: 0.0,
        }
        .apply(&mut s)
        .unwrap();
        ControlAction::SetTransform {
            body: 0,
            part: TransformPart::Translation,
            axis: Axis::X,
            value: 400.0,
        }
        .apply(&mut s)
        .unwrap();
        assert_eq!(s.bodies()[0].transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(s.bodies()[0].transform.translation.x, 50.0);
        assert!(s.config().validate().is_ok());
    }

    #[test]
    fn unknown_body_is_an_error() {
        let mut s = scene();
        let err = ControlAction::BodyPeriod { body: 2, period: 1.0 }
            .apply(&mut s)
            .unwrap_err();
        assert!(matches!(err, ControlError::UnknownBody(2)));
    }

    #[test]
    fn parse_panel_edits() {
        assert_eq!(
            "objects=on".parse::<ControlAction>().unwrap(),
            ControlAction::AnimateObjects(Toggle::On)
        );
        assert_eq!(
            "camera=toggle".parse::<ControlAction>().unwrap(),
            ControlAction::AnimateCamera(Toggle::Flip)
        );
        assert_eq!(
            "camera-period=8".parse::<ControlAction>().unwrap(),
            ControlAction::CameraPeriod(8.0)
        );
        assert_eq!(
            "body1.period=2.5".parse::<ControlAction>().unwrap(),
            ControlAction::BodyPeriod {
                body: 1,
                period: 2.5
            }
        );
        assert_eq!(
            "body0.translation.y=-20".parse::<ControlAction>().unwrap(),
            ControlAction::SetTransform {
                body: 0,
                part: TransformPart::Translation,
                axis: Axis::Y,
                value: -20.0
            }
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in [
            "objects",
            "objects=maybe",
            "speed=3",
            "bodyx.period=1",
            "body0.colour.x=1",
            "body0.scale.w=1",
            "body0.translation.x=far",
        ] {
            assert!(
                matches!(input.parse::<ControlAction>(), Err(ControlError::Parse { .. })),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn queue_applies_in_order_and_empties() {
        let mut s = scene();
        let mut queue = ControlQueue::new();
        queue.push(ControlAction::AnimateCamera(Toggle::On));
        queue.push(ControlAction::AnimateCamera(Toggle::Flip));
        queue.push(ControlAction::ObjectPeriod(7.0));
        assert_eq!(queue.apply_all(&mut s).unwrap(), 3);
        assert!(queue.is_empty());
        assert!(!s.config().animate_camera);
        assert_eq!(s.config().object_period, 7.0);
    }

    #[test]
    fn queued_toggle_waits_for_frame_boundary() {
        let mut s = scene();
        let mut queue = ControlQueue::new();
        queue.push(ControlAction::AnimateObjects(Toggle::On));
        s.frame(1000.0);
        assert_eq!(s.bodies()[0].transform.translation.x, 30.0);
        queue.apply_all(&mut s).unwrap();
        s.frame(2000.0);
        assert_eq!(s.bodies()[0].transform.translation.x, 40.0);
    }
}
