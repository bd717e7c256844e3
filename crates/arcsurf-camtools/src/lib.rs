//! # ArcSurf CAM Tools
//!
//! The toolpath engine for layered machining of a circular arc surface, and
//! the pieces that turn its output into something a controller can run.
//!
//! ## Engine
//!
//! - **Arc Height Model**: surface height at a lateral position, clipped to the layer floor
//! - **Layer Extent Calculator**: valid X-domain of each layer
//! - **Layer Path Planner**: approach, plunge and sweep sequencing per layer
//! - **Program Assembler**: header, all layers in schedule order, footer
//!
//! ## Supporting Infrastructure
//!
//! - **G-code Writer**: Mach3/GRBL text encoder
//! - **Statistics**: move counts, path lengths and cutting time

pub mod arc_height;
pub mod error;
pub mod gcode_writer;
pub mod layer_extent;
pub mod layer_planner;
pub mod parameters;
pub mod program;
pub mod stats;

// Re-export commonly used items
pub use arcsurf_core::{LateralRange, Layer, LayerSchedule, MotionKind, MotionSegment, Position};
pub use arc_height::{arc_z, height};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use gcode_writer::{GcodeWriter, GcodeWriterSettings};
pub use layer_extent::lateral_range;
pub use layer_planner::{
    sweep_samples, LayerOutcome, LayerPlan, LayerPlanner, SkipReason, SkippedLayer,
};
pub use parameters::{ArcSurfaceParameters, SurfaceOrientation, SweepPattern};
pub use program::{assemble, Program, ProgramAssembler, ProgramEntry};
pub use stats::{ProgramStats, StatsCalculator};
