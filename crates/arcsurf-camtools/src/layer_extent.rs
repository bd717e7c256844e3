//! Layer extent calculator
//!
//! Finds where a layer's depth plane intersects the arc at that layer's own
//! radius, then limits the result to the configured half range.

use arcsurf_core::LateralRange;

/// Valid X-domain for a layer of `radius` cut at `depth`.
///
/// Returns a zero-width range at `apex_x` when the arc does not reach `depth`.
pub fn lateral_range(
    radius: f64,
    depth: f64,
    center_z: f64,
    apex_x: f64,
    max_half_range: f64,
) -> LateralRange {
    let dz = depth - center_z;
    let disc = radius * radius - dz * dz;
    if disc < 0.0 {
        return LateralRange::point(apex_x);
    }
    let effective = disc.sqrt().min(max_half_range);
    LateralRange::new(apex_x - effective, apex_x + effective)
}
