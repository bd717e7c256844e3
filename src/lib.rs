//! # ArcSurf
//!
//! Layered toolpath generation for machining a circular arc surface on a
//! 3-axis CNC mill. Each layer lowers the cutting plane by a fixed depth and
//! shrinks the arc radius by the same amount, and the tool sweeps the valid
//! lateral span of the arc at that depth.
//!
//! ## Architecture
//!
//! ArcSurf is organized as a workspace with multiple crates:
//!
//! 1. **arcsurf-core** - Motion segments, positions, layer schedule
//! 2. **arcsurf-camtools** - Arc height model, layer extents, path planning, program assembly, G-code
//! 3. **arcsurf-settings** - Job configuration files
//! 4. **arcsurf** - Command line binary that integrates all crates

pub use arcsurf_core::{LateralRange, Layer, LayerSchedule, MotionKind, MotionSegment, Position};

pub use arcsurf_camtools::{
    assemble, ArcSurfaceParameters, CamToolError, GcodeWriter, GcodeWriterSettings,
    LayerOutcome, ParameterError, Program, ProgramAssembler, ProgramEntry, ProgramStats,
    StatsCalculator, SurfaceOrientation, SweepPattern,
};

pub use arcsurf_settings::{Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Name, version and build date, as stamped into generated programs
pub fn generator_stamp() -> String {
    format!("arcsurf {} (built {})", VERSION, BUILD_DATE)
}

/// Initialize logging with the default configuration
///
/// Log lines go to stderr so that G-code written to stdout stays clean.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
