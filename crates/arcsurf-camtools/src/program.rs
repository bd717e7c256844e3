//! Program assembler
//!
//! Walks the layer schedule from the outermost layer inwards and stitches the
//! layer plans between an initialization block and a sign-off block.

use crate::error::CamToolResult;
use crate::layer_extent::lateral_range;
use crate::layer_planner::{LayerOutcome, LayerPlanner, SkippedLayer};
use crate::parameters::ArcSurfaceParameters;
use arcsurf_core::{LateralRange, Layer, MotionSegment, Position};
use serde::Serialize;
use tracing::{debug, info, warn};

/// One entry of an assembled program
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgramEntry {
    /// Z-only rapid to a clearance height (header and footer)
    Retract { z: f64 },
    /// Set the cutting feed rate
    FeedRate { rate: f64 },
    /// Linear move
    Move(MotionSegment),
    /// Marks the start of a planned layer
    LayerStart { layer: Layer, range: LateralRange },
    /// A layer that produced no motion
    LayerSkipped(SkippedLayer),
    /// Program end
    End,
}

/// Complete ordered program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub entries: Vec<ProgramEntry>,
}

impl Program {
    /// Motion segments in execution order
    pub fn motion_segments(&self) -> impl Iterator<Item = &MotionSegment> {
        self.entries.iter().filter_map(|entry| match entry {
            ProgramEntry::Move(segment) => Some(segment),
            _ => None,
        })
    }

    /// Layers that were skipped, in schedule order
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedLayer> {
        self.entries.iter().filter_map(|entry| match entry {
            ProgramEntry::LayerSkipped(skipped) => Some(skipped),
            _ => None,
        })
    }

    /// Layers that were cut, in schedule order
    pub fn planned_layers(&self) -> impl Iterator<Item = &Layer> {
        self.entries.iter().filter_map(|entry| match entry {
            ProgramEntry::LayerStart { layer, .. } => Some(layer),
            _ => None,
        })
    }

    pub fn to_json(&self) -> CamToolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the full program for one set of parameters
#[derive(Debug, Clone)]
pub struct ProgramAssembler {
    params: ArcSurfaceParameters,
}

impl ProgramAssembler {
    /// Validates the parameters; nothing is computed for an invalid configuration.
    pub fn new(params: ArcSurfaceParameters) -> CamToolResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ArcSurfaceParameters {
        &self.params
    }

    /// Every layer outcome in schedule order
    pub fn plan_layers(&self) -> Vec<LayerOutcome> {
        let p = &self.params;
        let planner = LayerPlanner::new(p);
        let mut cursor = Position::new(p.apex_x, p.y_start, p.safe_height);
        let mut outcomes = Vec::with_capacity(p.layer_count as usize);

        for layer in p.schedule().layers(p.initial_radius) {
            let range = lateral_range(
                layer.radius,
                layer.depth,
                p.center_z,
                p.apex_x,
                p.effective_half_range(),
            );
            let outcome = planner.plan_layer(layer, range, cursor);
            match &outcome {
                LayerOutcome::Planned(plan) => {
                    debug!(
                        layer = layer.index,
                        depth = layer.depth,
                        radius = layer.radius,
                        low = range.low,
                        high = range.high,
                        segments = plan.segments.len(),
                        "Planned layer"
                    );
                    cursor = plan
                        .segments
                        .iter()
                        .fold(cursor, |pos, segment| segment.end_from(pos));
                }
                LayerOutcome::Skipped(skipped) => {
                    warn!("{}", skipped);
                }
            }
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Assemble header, every layer and footer
    pub fn assemble(&self) -> Program {
        let p = &self.params;
        let mut entries = vec![
            ProgramEntry::Retract { z: p.safe_height },
            ProgramEntry::Move(MotionSegment::rapid_xy(p.apex_x, p.y_start)),
            ProgramEntry::FeedRate { rate: p.feed_rate },
        ];

        let mut skipped = 0usize;
        for outcome in self.plan_layers() {
            match outcome {
                LayerOutcome::Planned(plan) => {
                    entries.push(ProgramEntry::LayerStart {
                        layer: plan.layer,
                        range: plan.range,
                    });
                    entries.extend(plan.segments.into_iter().map(ProgramEntry::Move));
                }
                LayerOutcome::Skipped(layer) => {
                    skipped += 1;
                    entries.push(ProgramEntry::LayerSkipped(layer));
                }
            }
        }

        entries.push(ProgramEntry::Retract { z: p.safe_height });
        entries.push(ProgramEntry::Move(MotionSegment::rapid_xy(0.0, 0.0)));
        entries.push(ProgramEntry::End);

        info!(
            layers = p.layer_count,
            skipped,
            pattern = %p.pattern,
            entries = entries.len(),
            "Assembled arc surface program"
        );

        Program { entries }
    }
}

/// Validate `params` and assemble the program in one call
pub fn assemble(params: &ArcSurfaceParameters) -> CamToolResult<Program> {
    Ok(ProgramAssembler::new(params.clone())?.assemble())
}
