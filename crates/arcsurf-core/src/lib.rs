//! # ArcSurf Core
//!
//! Value types shared by the arc-surface toolpath engine and its front ends:
//! motion segments, tool positions, the layer schedule and per-layer
//! lateral ranges.

pub mod layer;
pub mod motion;

pub use layer::{LateralRange, Layer, LayerSchedule};
pub use motion::{MotionKind, MotionSegment, Position};
