//! Layer path planner
//!
//! Turns one layer (depth, radius, lateral range) into an ordered list of
//! motion segments: edge approach, plunge, then the lateral sweeps of the
//! selected [`SweepPattern`].
//!
//! Sweeps are discretized by step count and linear interpolation, so both ends
//! of every sweep are always reached exactly. Sweeps that pass the apex are
//! split there, which puts a sample on the apex itself.

use crate::arc_height::height;
use crate::parameters::{ArcSurfaceParameters, SweepPattern};
use arcsurf_core::{LateralRange, Layer, MotionSegment, Position};
use serde::Serialize;
use std::fmt;

/// Slack applied before rounding the step count up, so a distance that is an
/// exact multiple of the step does not gain an extra sample from rounding noise.
const STEP_TOLERANCE: f64 = 1e-9;

/// X positions of a sweep from `from` to `to`, both ends included.
///
/// Uses `ceil(|to - from| / |step|)` equal steps. The final sample is `to`
/// itself, never an accumulated value.
pub fn sweep_samples(from: f64, to: f64, step: f64) -> Vec<f64> {
    let distance = (to - from).abs();
    if distance == 0.0 {
        return vec![from];
    }
    let step = step.abs();
    if step == 0.0 {
        return vec![from, to];
    }

    let steps = (((distance / step) - STEP_TOLERANCE).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            if i == steps {
                to
            } else {
                from + (to - from) * (i as f64 / steps as f64)
            }
        })
        .collect()
}

/// Why a layer produced no motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The schedule has removed more depth than the arc radius
    NonPositiveRadius,
    /// The arc does not reach the layer depth inside the allowed range
    NoLateralExtent,
}

/// A layer the planner declined to cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkippedLayer {
    pub layer: Layer,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::NonPositiveRadius => write!(
                f,
                "Layer {}: SKIPPED (R={:.2} <= 0)",
                self.layer.index, self.layer.radius
            ),
            SkipReason::NoLateralExtent => write!(
                f,
                "Layer {}: SKIPPED (no lateral extent at Z={:.3})",
                self.layer.index, self.layer.depth
            ),
        }
    }
}

/// Motion for one layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerPlan {
    pub layer: Layer,
    pub range: LateralRange,
    pub segments: Vec<MotionSegment>,
    /// X of the first cutting sample
    pub start_position: f64,
    /// X where the plan terminates
    pub end_position: f64,
}

impl LayerPlan {
    /// Feed moves that carry an explicit Z, i.e. the surface samples
    pub fn cutting_samples(&self) -> impl Iterator<Item = &MotionSegment> {
        self.segments.iter().filter(|s| !s.is_rapid() && s.z.is_some())
    }
}

/// Result of planning one layer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerOutcome {
    Planned(LayerPlan),
    Skipped(SkippedLayer),
}

impl LayerOutcome {
    pub fn plan(&self) -> Option<&LayerPlan> {
        match self {
            Self::Planned(plan) => Some(plan),
            Self::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Plans the motion of individual layers
#[derive(Debug, Clone, Copy)]
pub struct LayerPlanner<'a> {
    params: &'a ArcSurfaceParameters,
}

impl<'a> LayerPlanner<'a> {
    pub fn new(params: &'a ArcSurfaceParameters) -> Self {
        Self { params }
    }

    /// Emitted cut height at `x` for `layer`, including the Z offset
    pub fn surface_z(&self, layer: &Layer, x: f64) -> f64 {
        let p = self.params;
        height(
            x,
            layer.radius,
            p.center_z,
            p.apex_x,
            layer.depth,
            p.surface_orientation,
        ) + p.z_offset
    }

    /// Plan `layer` over `range`, starting from the tool position `entry`.
    ///
    /// `entry` only decides whether a retract and reposition is needed; the
    /// sweep direction depends on the pattern and the layer parity alone.
    pub fn plan_layer(&self, layer: Layer, range: LateralRange, entry: Position) -> LayerOutcome {
        if layer.is_collapsed() {
            return LayerOutcome::Skipped(SkippedLayer {
                layer,
                reason: SkipReason::NonPositiveRadius,
            });
        }
        if range.is_degenerate() {
            return LayerOutcome::Skipped(SkippedLayer {
                layer,
                reason: SkipReason::NoLateralExtent,
            });
        }

        let p = self.params;
        let apex = p.apex_x;
        let (y0, y1) = (p.y_start, p.y_end);
        let mut path = LayerPath::new(*self, layer, entry);

        let start_position = match p.pattern {
            SweepPattern::SweepBothHalves => {
                path.enter(apex, y0);
                path.cut(apex, range.low, y0);
                path.cross(y1);
                path.cut(range.low, apex, y1);
                path.cut(apex, range.high, y1);
                path.cross(y0);
                path.cut(range.high, apex, y0);
                apex
            }
            SweepPattern::ZigzagAlternate => {
                let (first, last) = if layer.is_odd() {
                    (range.low, range.high)
                } else {
                    (range.high, range.low)
                };
                path.enter(first, y0);
                path.cut(first, apex, y0);
                path.cut(apex, last, y0);
                path.cross(y1);
                path.cut(last, apex, y1);
                path.cut(apex, first, y1);
                first
            }
            SweepPattern::EdgesToCenter => {
                path.enter(range.low, y0);
                path.cut(range.low, apex, y0);
                path.enter(range.high, y0);
                path.cut(range.high, apex, y0);
                range.low
            }
        };

        let end_position = path.cursor.x;
        LayerOutcome::Planned(LayerPlan {
            layer,
            range,
            segments: path.segments,
            start_position,
            end_position,
        })
    }
}

/// Segment buffer that follows the tool position while a layer is built
struct LayerPath<'a> {
    planner: LayerPlanner<'a>,
    layer: Layer,
    cursor: Position,
    segments: Vec<MotionSegment>,
}

impl<'a> LayerPath<'a> {
    fn new(planner: LayerPlanner<'a>, layer: Layer, entry: Position) -> Self {
        Self {
            planner,
            layer,
            cursor: entry,
            segments: Vec::new(),
        }
    }

    fn push(&mut self, segment: MotionSegment) {
        self.cursor = segment.end_from(self.cursor);
        self.segments.push(segment);
    }

    /// Reach the surface at (`x`, `y`): retract and reposition if the tool is
    /// elsewhere, then plunge.
    fn enter(&mut self, x: f64, y: f64) {
        let target = Position::new(x, y, self.cursor.z);
        if !self.cursor.same_lateral(&target) {
            let safe = self.planner.params.safe_height;
            if self.cursor.z != safe {
                self.push(MotionSegment::rapid(self.cursor.x, self.cursor.y, safe));
            }
            self.push(MotionSegment::rapid_xy(x, y));
        }
        let z = self.planner.surface_z(&self.layer, x);
        self.plunge(z);
    }

    fn plunge(&mut self, z: f64) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        let clearance = self.planner.params.plunge_clearance;
        if clearance > 0.0 && self.cursor.z > z + clearance {
            self.push(MotionSegment::rapid(x, y, z + clearance));
        }
        if self.cursor.z != z {
            self.push(MotionSegment::feed(x, y, z));
        }
    }

    /// Move to the other offset line, Z held
    fn cross(&mut self, y: f64) {
        self.push(MotionSegment::feed_xy(self.cursor.x, y));
    }

    /// Follow the surface from `from` to `to` along the line `y`
    fn cut(&mut self, from: f64, to: f64, y: f64) {
        for x in sweep_samples(from, to, self.planner.params.sweep_step) {
            let z = self.planner.surface_z(&self.layer, x);
            let sample = Position::new(x, y, z);
            if sample == self.cursor {
                continue;
            }
            self.push(MotionSegment::feed(x, y, z));
        }
    }
}
