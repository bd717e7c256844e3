//! Arc surfacing parameters
//!
//! Everything the engine needs is carried by one immutable
//! [`ArcSurfaceParameters`] value, validated once before any layer is computed.

use crate::error::{ParameterError, ParameterResult};
use arcsurf_core::LayerSchedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the circle the machined surface lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceOrientation {
    /// Lower half of the circle: `z = center_z - sqrt(..)`, clipped with `min`
    ConcaveDown,
    /// Upper half of the circle: `z = center_z + sqrt(..)`, clipped with `max`
    ConvexUp,
}

impl SurfaceOrientation {
    /// Arc height from the circle center and the square-root term
    pub fn arc_z(self, center_z: f64, root: f64) -> f64 {
        match self {
            Self::ConcaveDown => center_z - root,
            Self::ConvexUp => center_z + root,
        }
    }

    /// Keep the tool on the safe side of the layer floor
    pub fn clip(self, z_arc: f64, depth_floor: f64) -> f64 {
        match self {
            Self::ConcaveDown => z_arc.min(depth_floor),
            Self::ConvexUp => z_arc.max(depth_floor),
        }
    }
}

impl Default for SurfaceOrientation {
    fn default() -> Self {
        Self::ConvexUp
    }
}

impl fmt::Display for SurfaceOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConcaveDown => write!(f, "concave down"),
            Self::ConvexUp => write!(f, "convex up"),
        }
    }
}

/// Sweep sequencing policy, chosen once per program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepPattern {
    /// Apex to each edge and back on two offset lines; every layer ends at the apex
    SweepBothHalves,
    /// Full-width sweeps whose direction flips with layer parity
    ZigzagAlternate,
    /// Plunge at each edge and cut inwards to the apex
    EdgesToCenter,
}

impl Default for SweepPattern {
    fn default() -> Self {
        Self::ZigzagAlternate
    }
}

impl fmt::Display for SweepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SweepBothHalves => write!(f, "sweep-both-halves"),
            Self::ZigzagAlternate => write!(f, "zigzag"),
            Self::EdgesToCenter => write!(f, "edges-to-center"),
        }
    }
}

impl FromStr for SweepPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "sweep-both-halves" | "both-halves" | "both" => Ok(Self::SweepBothHalves),
            "zigzag" | "zigzag-alternate" => Ok(Self::ZigzagAlternate),
            "edges-to-center" | "edges" => Ok(Self::EdgesToCenter),
            _ => Err(format!("Unknown sweep pattern: {}", s)),
        }
    }
}

/// Parameters for arc surface machining
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSurfaceParameters {
    /// X coordinate of the arc apex (mm)
    pub apex_x: f64,
    /// Z coordinate of the arc center (mm)
    pub center_z: f64,
    /// Radius of the outermost surface (mm)
    pub initial_radius: f64,
    /// Depth removed per layer (mm)
    pub depth_per_layer: f64,
    /// Number of layers
    pub layer_count: u32,
    /// Lateral discretization step along X (mm)
    pub sweep_step: f64,
    /// Maximum machining distance from the apex along X (mm)
    pub max_half_range: f64,
    /// Tool radius subtracted from `max_half_range` (mm)
    pub tool_radius: f64,
    /// Cutting feed rate (mm/min)
    pub feed_rate: f64,
    /// Clearance height for retracts (mm)
    pub safe_height: f64,
    /// Sweep sequencing policy
    pub pattern: SweepPattern,
    /// Rapid down to this distance above the cut, then feed the rest. 0 disables.
    pub plunge_clearance: f64,
    /// Which half of the circle is machined
    pub surface_orientation: SurfaceOrientation,
    /// First sweep offset line (Y, mm)
    pub y_start: f64,
    /// Second sweep offset line (Y, mm)
    pub y_end: f64,
    /// Constant added to every emitted cut height (mm)
    pub z_offset: f64,
}

impl Default for ArcSurfaceParameters {
    fn default() -> Self {
        Self {
            apex_x: 0.0,
            center_z: 0.0,
            initial_radius: 22.0,
            depth_per_layer: 0.1,
            layer_count: 15,
            sweep_step: 0.2,
            max_half_range: 15.0,
            tool_radius: 0.5,
            feed_rate: 20.0,
            safe_height: 5.0,
            pattern: SweepPattern::default(),
            plunge_clearance: 0.0,
            surface_orientation: SurfaceOrientation::default(),
            y_start: 0.0,
            y_end: 0.4,
            z_offset: -22.0,
        }
    }
}

impl ArcSurfaceParameters {
    /// Depth schedule described by these parameters
    pub fn schedule(&self) -> LayerSchedule {
        LayerSchedule::new(self.depth_per_layer, self.layer_count)
    }

    /// Half range after the tool radius has been taken off
    pub fn effective_half_range(&self) -> f64 {
        self.max_half_range - self.tool_radius
    }

    /// Reject configurations the engine cannot machine
    pub fn validate(&self) -> ParameterResult<()> {
        let finite = [
            ("apex_x", self.apex_x),
            ("center_z", self.center_z),
            ("initial_radius", self.initial_radius),
            ("depth_per_layer", self.depth_per_layer),
            ("sweep_step", self.sweep_step),
            ("max_half_range", self.max_half_range),
            ("tool_radius", self.tool_radius),
            ("feed_rate", self.feed_rate),
            ("safe_height", self.safe_height),
            ("plunge_clearance", self.plunge_clearance),
            ("y_start", self.y_start),
            ("y_end", self.y_end),
            ("z_offset", self.z_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite { name, value });
            }
        }

        let positive = [
            ("initial_radius", self.initial_radius),
            ("depth_per_layer", self.depth_per_layer),
            ("sweep_step", self.sweep_step),
            ("feed_rate", self.feed_rate),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ParameterError::NotPositive { name, value });
            }
        }

        if self.layer_count < 1 {
            return Err(ParameterError::InvalidValue {
                name: "layer_count",
                reason: "at least one layer is required".to_string(),
            });
        }

        let non_negative = [
            ("tool_radius", self.tool_radius),
            ("plunge_clearance", self.plunge_clearance),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ParameterError::Negative { name, value });
            }
        }

        if self.effective_half_range() < 0.0 {
            return Err(ParameterError::Incompatible(format!(
                "tool radius {} exceeds max half range {}",
                self.tool_radius, self.max_half_range
            )));
        }

        Ok(())
    }
}
