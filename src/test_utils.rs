/*
 * Test utilities for Actuation Curve
 *
 * Common fixtures and assertion helpers shared by the unit test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::curves::{ControlPoint, CurveLimits, CurveModel};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Model seeded with the default diagonal on a 0..100 domain
    pub fn create_default_model() -> CurveModel {
        CurveModel::with_default_seed(CurveLimits::default()).expect("default seed is valid")
    }

    /// Points with known slopes 1.28, 0.66 and 1.32
    pub fn create_reference_points() -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(0.0, 1.0),
            ControlPoint::new(25.0, 33.0),
            ControlPoint::new(75.0, 66.0),
            ControlPoint::new(100.0, 99.0),
        ]
    }

    /// Creates a temporary JSON file with the given data
    pub fn create_temp_json_file<T: serde::Serialize>(data: &T) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let json = serde_json::to_string_pretty(data).expect("Failed to serialize data");
        temp_file.write_all(json.as_bytes()).expect("Failed to write to temp file");
        temp_file.flush().expect("Failed to flush temp file");
        temp_file
    }

    /// Asserts that two floating point values are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            (a - b).abs() < tolerance,
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a, b, tolerance
        );
    }

    /// Strictly increasing on both axes and inside the domain
    pub fn check_curve_valid(points: &[ControlPoint], limits: &CurveLimits) -> bool {
        let in_range = points
            .iter()
            .all(|p| limits.contains(p.x) && limits.contains(p.y));
        let increasing = points.windows(2).all(|w| w[0].x < w[1].x && w[0].y < w[1].y);
        points.len() >= 2 && in_range && increasing
    }

    pub fn assert_curve_valid(model: &CurveModel) {
        assert!(
            check_curve_valid(model.points(), model.limits()),
            "curve violates invariants: {:?}",
            model.points()
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_check_curve_valid() {
            let limits = CurveLimits::default();
            assert!(check_curve_valid(&create_reference_points(), &limits));

            let flat = [ControlPoint::new(0.0, 10.0), ControlPoint::new(50.0, 10.0)];
            assert!(!check_curve_valid(&flat, &limits));

            let outside = [ControlPoint::new(0.0, 10.0), ControlPoint::new(150.0, 20.0)];
            assert!(!check_curve_valid(&outside, &limits));
        }

        #[test]
        fn test_assert_approx_eq() {
            assert_approx_eq(1.0, 1.0001, 0.001);
        }

        #[test]
        #[should_panic(expected = "Values not approximately equal")]
        fn test_assert_approx_eq_fails() {
            assert_approx_eq(1.0, 1.1, 0.01);
        }
    }
}
