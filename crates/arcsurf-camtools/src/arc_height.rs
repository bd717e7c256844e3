//! Arc height model
//!
//! Maps a lateral position to the height of the circular arc at the current
//! layer radius, clipped against the layer floor.

use crate::parameters::SurfaceOrientation;

/// Unclipped arc height at `x`, or `None` when `x` lies outside the circle.
pub fn arc_z(
    x: f64,
    radius: f64,
    center_z: f64,
    apex_x: f64,
    orientation: SurfaceOrientation,
) -> Option<f64> {
    let dx = x - apex_x;
    let disc = radius * radius - dx * dx;
    if disc < 0.0 {
        return None;
    }
    Some(orientation.arc_z(center_z, disc.sqrt()))
}

/// Surface height at `x` for a layer whose floor is `depth_floor`.
///
/// Outside the circle the surface is undefined and the floor itself is
/// returned. The planner never samples there; the fallback only keeps the
/// function total.
pub fn height(
    x: f64,
    radius: f64,
    center_z: f64,
    apex_x: f64,
    depth_floor: f64,
    orientation: SurfaceOrientation,
) -> f64 {
    match arc_z(x, radius, center_z, apex_x, orientation) {
        Some(z_arc) => orientation.clip(z_arc, depth_floor),
        None => depth_floor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arc_satisfies_circle_equation() {
        let (apex_x, center_z, radius) = (1.5, -10.0, 9.9);
        for orientation in [SurfaceOrientation::ConcaveDown, SurfaceOrientation::ConvexUp] {
            for i in 1..40 {
                let x = apex_x - radius + 2.0 * radius * f64::from(i) / 40.0;
                let z = arc_z(x, radius, center_z, apex_x, orientation)
                    .expect("x is inside the circle");
                let lhs = (x - apex_x).powi(2) + (z - center_z).powi(2);
                assert_abs_diff_eq!(lhs, radius * radius, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_concave_clip_keeps_deeper_value() {
        // apex of a concave arc sits at center_z - radius
        let z = height(0.0, 10.0, -10.0, 0.0, -0.1, SurfaceOrientation::ConcaveDown);
        assert_abs_diff_eq!(z, -20.0, epsilon = 1e-12);

        // shallow arc above the floor is pulled down to the floor
        let z = height(0.0, 1.0, 5.0, 0.0, -0.5, SurfaceOrientation::ConcaveDown);
        assert_abs_diff_eq!(z, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_convex_clip_keeps_higher_value() {
        let z = height(0.0, 21.9, 0.0, 0.0, -0.1, SurfaceOrientation::ConvexUp);
        assert_abs_diff_eq!(z, 21.9, epsilon = 1e-12);

        let z = height(3.0, 3.0, -5.0, 0.0, -1.0, SurfaceOrientation::ConvexUp);
        assert_abs_diff_eq!(z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outside_circle_falls_back_to_floor() {
        assert!(arc_z(6.0, 5.0, 0.0, 0.0, SurfaceOrientation::ConvexUp).is_none());
        let z = height(6.0, 5.0, 0.0, 0.0, -0.3, SurfaceOrientation::ConvexUp);
        assert_eq!(z, -0.3);
        let z = height(-6.0, 5.0, 0.0, 0.0, -0.3, SurfaceOrientation::ConcaveDown);
        assert_eq!(z, -0.3);
    }
}
