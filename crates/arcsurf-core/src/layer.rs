//! Layer schedule and per-layer geometry values
//!
//! Layers are never stored: each one is derived from the schedule and the
//! initial arc radius when it is needed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Depth increment and number of material-removal passes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSchedule {
    /// Depth removed by each layer (mm, positive)
    pub depth_per_layer: f64,
    /// Number of layers to cut
    pub layer_count: u32,
}

impl LayerSchedule {
    pub fn new(depth_per_layer: f64, layer_count: u32) -> Self {
        Self {
            depth_per_layer,
            layer_count,
        }
    }

    /// Derive layer `index` (1-based) for an arc of `initial_radius`
    pub fn layer(&self, index: u32, initial_radius: f64) -> Layer {
        let removed = self.depth_per_layer * f64::from(index);
        Layer {
            index,
            depth: -removed,
            radius: initial_radius - removed,
        }
    }

    /// All layers, outermost first
    pub fn layers(&self, initial_radius: f64) -> impl Iterator<Item = Layer> + '_ {
        (1..=self.layer_count).map(move |k| self.layer(k, initial_radius))
    }

    /// Depth of the final layer
    pub fn total_depth(&self) -> f64 {
        self.depth_per_layer * f64::from(self.layer_count)
    }
}

/// One discrete depth increment of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 1-based layer number
    pub index: u32,
    /// Target depth of this layer (negative below stock top)
    pub depth: f64,
    /// Arc radius reduced by the depth already removed
    pub radius: f64,
}

impl Layer {
    /// The radius has shrunk to nothing; the layer cannot be cut.
    pub fn is_collapsed(&self) -> bool {
        self.radius <= 0.0
    }

    pub fn is_odd(&self) -> bool {
        self.index % 2 == 1
    }
}

/// Valid X-domain of one layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralRange {
    pub low: f64,
    pub high: f64,
}

impl LateralRange {
    pub fn new(low: f64, high: f64) -> Self {
        debug_assert!(low <= high, "LateralRange low {low} above high {high}");
        Self { low, high }
    }

    /// Zero-width range pinned at `x`
    pub fn point(x: f64) -> Self {
        Self { low: x, high: x }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.low && x <= self.high
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

impl fmt::Display for LateralRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.low, self.high)
    }
}
