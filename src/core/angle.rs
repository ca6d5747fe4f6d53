// Joint angle from three landmark positions

use crate::models::geometry::Point2D;
use crate::models::pose::ArmLandmarks;

/// Interior angle at `b` (degrees, 0-180) between rays `b->a` and `b->c`.
///
/// Coincident points are not special-cased: `atan2(0, 0)` is 0, so the
/// result is still finite.
pub fn calculate_angle(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Elbow angle of one arm
pub fn elbow_angle(arm: &ArmLandmarks) -> f64 {
    calculate_angle(arm.shoulder, arm.elbow, arm.wrist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_right_angle() {
        let angle = calculate_angle(
            Point2D::new(0.0, 1.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
        );
        assert!(approx(angle, 90.0));
    }

    #[test]
    fn test_straight_arm_is_180() {
        let angle = calculate_angle(
            Point2D::new(0.5, 0.2),
            Point2D::new(0.5, 0.4),
            Point2D::new(0.5, 0.6),
        );
        assert!(approx(angle, 180.0));
    }

    #[test]
    fn test_reflex_angle_is_folded() {
        // Raw atan2 difference is 270 degrees here
        let angle = calculate_angle(
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, -1.0),
        );
        assert!(approx(angle, 90.0));
    }

    #[test]
    fn test_degenerate_points_stay_finite() {
        let p = Point2D::new(0.3, 0.3);
        let angle = calculate_angle(p, p, Point2D::new(0.6, 0.3));
        assert!(angle.is_finite());
        assert!(approx(angle, 0.0));

        let angle = calculate_angle(p, p, p);
        assert!(approx(angle, 0.0));
    }

    #[test]
    fn test_elbow_angle_uses_elbow_as_vertex() {
        let arm = ArmLandmarks {
            shoulder: Point2D::new(0.4, 0.2),
            elbow: Point2D::new(0.4, 0.4),
            wrist: Point2D::new(0.6, 0.4),
        };
        assert!(approx(elbow_angle(&arm), 90.0));
    }

    fn point() -> impl Strategy<Value = Point2D> {
        (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y)| Point2D::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_angle_in_range(a in point(), b in point(), c in point()) {
            let angle = calculate_angle(a, b, c);
            prop_assert!((0.0..=180.0).contains(&angle), "angle {} out of range", angle);
        }

        #[test]
        fn prop_angle_symmetric(a in point(), b in point(), c in point()) {
            let forward = calculate_angle(a, b, c);
            let backward = calculate_angle(c, b, a);
            prop_assert!((forward - backward).abs() < 1e-9, "{} != {}", forward, backward);
        }
    }
}
