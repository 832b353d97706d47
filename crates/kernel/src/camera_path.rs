use glam::Vec3;
use primscene_common::Axis;

/// Camera patrol around four axis-aligned waypoints.
///
/// The camera travels one edge at a time, moving only along the axis the
/// edge runs on. Arrival compares truncated integer coordinates; the moving
/// coordinate is clamped onto the target so every edge terminates exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPath {
    position: Vec3,
    waypoints: [Vec3; 4],
    current: usize,
    next: usize,
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WAYPOINTS)
    }
}

impl CameraPath {
    /// Corners of the default 200 × 200 patrol square, counter-clockwise
    /// starting bottom-left.
    pub const DEFAULT_WAYPOINTS: [Vec3; 4] = [
        Vec3::new(-100.0, -100.0, 0.0),
        Vec3::new(-100.0, 100.0, 0.0),
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(100.0, -100.0, 0.0),
    ];

    /// Start at `waypoints[0]` heading for `waypoints[1]`.
    pub fn new(waypoints: [Vec3; 4]) -> Self {
        Self {
            position: waypoints[0],
            waypoints,
            current: 0,
            next: 1,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn waypoints(&self) -> &[Vec3; 4] {
        &self.waypoints
    }

    /// Index of the waypoint the current edge starts from.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the waypoint being travelled to.
    pub fn next(&self) -> usize {
        self.next
    }

    pub fn target(&self) -> Vec3 {
        self.waypoints[self.next]
    }

    /// Axis the current edge runs along.
    pub fn edge_axis(&self) -> Axis {
        Axis::dominant(self.target() - self.waypoints[self.current])
    }

    /// Length of the current edge.
    pub fn segment_length(&self) -> f32 {
        self.waypoints[self.current].distance(self.target())
    }

    /// Unit normal of the plane the patrol lies in, oriented so its largest
    /// component is positive. Falls back to +Y for degenerate paths.
    pub fn plane_normal(&self) -> Vec3 {
        let [a, b, _, d] = self.waypoints;
        let n = (b - a).cross(d - a).normalize_or_zero();
        if n == Vec3::ZERO {
            return Vec3::Y;
        }
        if Axis::dominant(n).get(n) < 0.0 { -n } else { n }
    }

    /// Per-frame displacement: a full edge takes `period` seconds.
    ///
    /// Non-positive or non-finite results become 0, so the camera holds
    /// still rather than backing away from its target.
    pub fn step_for(&self, delta: f64, period: f64) -> f32 {
        let step = (self.segment_length() as f64 * delta / period) as f32;
        if step.is_finite() && step > 0.0 { step } else { 0.0 }
    }

    /// Whether the camera sits on its target, by truncated coordinates.
    pub fn arrived(&self) -> bool {
        self.position.trunc() == self.target().trunc()
    }

    /// Advance one frame. Returns the index of the waypoint reached, if any.
    pub fn advance(&mut self, delta: f64, period: f64, enabled: bool) -> Option<usize> {
        if !enabled {
            return None;
        }
        let step = self.step_for(delta, period);
        self.advance_by(step)
    }

    /// Move up to `step` along the current edge, then switch edges on arrival.
    ///
    /// Negative or NaN steps are treated as 0.
    pub fn advance_by(&mut self, step: f32) -> Option<usize> {
        let step = if step > 0.0 { step } else { 0.0 };
        if !self.arrived() {
            let axis = self.edge_axis();
            let goal = axis.get(self.target());
            let coord = axis.get_mut(&mut self.position);
            *coord = if goal > *coord {
                (*coord + step).min(goal)
            } else {
                (*coord - step).max(goal)
            };
        }

        if !self.arrived() {
            return None;
        }
        let reached = self.next;
        self.current = self.next;
        self.next = (self.next + 1) % self.waypoints.len();
        tracing::debug!(waypoint = reached, position = ?self.position, "camera reached waypoint");
        Some(reached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_corner() {
        let path = CameraPath::default();
        assert_eq!(path.position(), Vec3::new(-100.0, -100.0, 0.0));
        assert_eq!(path.current(), 0);
        assert_eq!(path.next(), 1);
        assert_eq!(path.edge_axis(), Axis::Y);
        assert_eq!(path.segment_length(), 200.0);
    }

    #[test]
    fn ten_steps_of_twenty_reach_second_corner() {
        let mut path = CameraPath::default();
        for i in 1..10 {
            assert_eq!(path.advance_by(20.0), None, "early arrival at step {i}");
            assert_eq!(path.position().y, -100.0 + 20.0 * i as f32);
        }
        assert_eq!(path.advance_by(20.0), Some(1));
        assert_eq!(path.position(), Vec3::new(-100.0, 100.0, 0.0));
        assert_eq!(path.current(), 1);
        assert_eq!(path.next(), 2);
    }

    #[test]
    fn square_in_xy_plane_has_z_normal() {
        assert_eq!(CameraPath::default().plane_normal(), Vec3::Z);
        let flat = CameraPath::new([
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(10.0, 5.0, 0.0),
            Vec3::new(10.0, 5.0, 10.0),
            Vec3::new(0.0, 5.0, 10.0),
        ]);
        assert_eq!(flat.plane_normal(), Vec3::Y);
        assert_eq!(CameraPath::new([Vec3::ONE; 4]).plane_normal(), Vec3::Y);
    }

    #[test]
    fn step_is_clamped_at_target() {
        let mut path = CameraPath::default();
        assert_eq!(path.advance_by(500.0), Some(1));
        assert_eq!(path.position().y, 100.0);
        assert_eq!(path.edge_axis(), Axis::X);
    }

    #[test]
    fn disabled_advance_keeps_position() {
        let mut path = CameraPath::default();
        assert_eq!(path.advance(1.0, 10.0, false), None);
        assert_eq!(path, CameraPath::default());
    }

    #[test]
    fn step_derives_from_period() {
        let path = CameraPath::default();
        assert_eq!(path.step_for(1.0, 10.0), 20.0);
        assert_eq!(path.step_for(0.5, 5.0), 20.0);
    }

    #[test]
    fn full_lap_visits_corners_in_order() {
        let mut path = CameraPath::default();
        let mut visits = Vec::new();
        for _ in 0..10_000 {
            if let Some(reached) = path.advance(1.0 / 60.0, 10.0, true) {
                visits.push(reached);
                if reached == 0 {
                    break;
                }
            }
        }
        assert_eq!(visits, vec![1, 2, 3, 0]);
        assert_eq!(path.current(), 0);
        assert_eq!(path.next(), 1);
        assert_eq!(path.position(), CameraPath::DEFAULT_WAYPOINTS[0]);
    }

    #[test]
    fn never_overshoots_moving_axis() {
        let mut path = CameraPath::default();
        for _ in 0..5_000 {
            let axis = path.edge_axis();
            let start = axis.get(path.waypoints()[path.current()]);
            let goal = axis.get(path.target());
            let (lo, hi) = if start < goal { (start, goal) } else { (goal, start) };

            path.advance(1.0 / 7.0, 3.0, true);

            let v = axis.get(path.position());
            assert!(v >= lo && v <= hi, "{axis} = {v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn bad_period_holds_camera_still() {
        let mut path = CameraPath::default();
        for period in [-10.0, 0.0, f64::NAN] {
            assert_eq!(path.step_for(1.0, period), 0.0);
            assert_eq!(path.advance(1.0, period, true), None);
        }
        assert_eq!(path.advance_by(-20.0), None);
        assert_eq!(path.position(), CameraPath::DEFAULT_WAYPOINTS[0]);
    }

    #[test]
    fn truncated_arrival_leaves_fractional_residual() {
        // x runs 10.9 -> 0 in steps of 2: 8.9, 6.9, 4.9, 2.9, 0.9.
        // At 0.9 both coordinates truncate to 0, so the corner counts as
        // reached one step early.
        let mut path = CameraPath::new([
            Vec3::new(10.9, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(10.9, 10.0, 0.0),
        ]);
        for _ in 0..4 {
            assert_eq!(path.advance_by(2.0), None);
        }
        assert_eq!(path.advance_by(2.0), Some(1));
        assert!((path.position().x - 0.9).abs() < 1e-5, "{}", path.position());

        // The residual rides along the next edge and is still there at the
        // following corner.
        for _ in 0..4 {
            assert_eq!(path.advance_by(2.0), None);
        }
        assert_eq!(path.advance_by(2.0), Some(2));
        assert!((path.position().x - 0.9).abs() < 1e-5);
        assert_eq!(path.position().y, 10.0);

        // Moving along x again brings the camera back onto the corner.
        let mut frames = 0;
        while path.advance_by(2.0) != Some(3) {
            frames += 1;
            assert!(frames < 10);
        }
        assert!(path.position().abs_diff_eq(Vec3::new(10.9, 10.0, 0.0), 1e-5));
        while path.advance_by(2.0) != Some(0) {
            frames += 1;
            assert!(frames < 20);
        }
        assert!(path.position().abs_diff_eq(path.waypoints()[0], 1e-5));
        assert_eq!(path.position().y, 0.0);
    }

    #[test]
    fn negative_side_of_zero_truncates_the_same_way() {
        let mut path = CameraPath::new([
            Vec3::new(-4.5, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(-4.5, 5.0, 0.0),
        ]);
        assert_eq!(path.advance_by(2.0), None);
        // -0.5 truncates to -0.0, which equals 0.0
        assert_eq!(path.advance_by(2.0), Some(1));
        assert_eq!(path.position().x, -0.5);
    }

    #[test]
    fn next_is_always_adjacent() {
        let mut path = CameraPath::default();
        for _ in 0..2_000 {
            path.advance(0.1, 1.3, true);
            assert_eq!(path.next(), (path.current() + 1) % 4);
        }
    }
}
