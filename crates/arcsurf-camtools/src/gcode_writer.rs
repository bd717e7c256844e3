//! G-code encoder
//!
//! Serializes an assembled [`Program`] into Mach3/GRBL style text: `%` framing,
//! unit and coordinate-mode directives, `G0`/`G1` moves with three decimals and
//! comment lines between layers.

use crate::parameters::ArcSurfaceParameters;
use crate::program::{Program, ProgramEntry};
use arcsurf_core::{MotionKind, MotionSegment};

/// Decimals for cutting moves
const MOVE_PRECISION: usize = 3;
/// Decimals for header and footer positioning
const FRAME_PRECISION: usize = 1;
const RULE: &str = "============================================================";

/// Output options for the encoder
#[derive(Debug, Clone)]
pub struct GcodeWriterSettings {
    /// Emit banner, section and per-layer comments
    pub include_comments: bool,
    /// Title line of the banner
    pub program_title: String,
    /// Tool name and build stamp for the banner, omitted when `None`
    pub generator: Option<String>,
}

impl Default for GcodeWriterSettings {
    fn default() -> Self {
        Self {
            include_comments: true,
            program_title: "2.5D Arc Surface Constant-Thickness Scanning".to_string(),
            generator: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Body,
    Footer,
}

/// Format a coordinate with fixed precision, never printing `-0.000`.
pub fn format_coord(value: f64, precision: usize) -> String {
    let text = format!("{:.prec$}", value, prec = precision);
    match text.strip_prefix('-') {
        Some(digits) if digits.chars().all(|c| c == '0' || c == '.') => digits.to_string(),
        _ => text,
    }
}

/// Render one motion segment as a G0/G1 line
pub fn format_move(segment: &MotionSegment, precision: usize) -> String {
    let code = match segment.kind {
        MotionKind::Rapid => "G0",
        MotionKind::Feed => "G1",
    };
    let mut line = format!(
        "{} X{} Y{}",
        code,
        format_coord(segment.x, precision),
        format_coord(segment.y, precision)
    );
    if let Some(z) = segment.z {
        line.push_str(&format!(" Z{}", format_coord(z, precision)));
    }
    line
}

/// Encodes programs as G-code text
#[derive(Debug, Clone, Default)]
pub struct GcodeWriter {
    settings: GcodeWriterSettings,
}

impl GcodeWriter {
    pub fn new(settings: GcodeWriterSettings) -> Self {
        Self { settings }
    }

    /// Encode `program`; `params` only feed the banner comments.
    pub fn write(&self, program: &Program, params: &ArcSurfaceParameters) -> String {
        let mut gcode = String::new();
        gcode.push_str("%\n");
        if self.settings.include_comments {
            self.push_banner(&mut gcode, params);
            gcode.push_str("; ========== INITIALIZATION ==========\n");
        }
        self.push_line(&mut gcode, "G90", "Absolute coordinates");
        self.push_line(&mut gcode, "G21", "Metric units");
        self.push_line(&mut gcode, "G40 G49 G80", "Cancel offsets and cycles");

        let mut section = Section::Header;
        for entry in &program.entries {
            match entry {
                ProgramEntry::Retract { z } => {
                    if section == Section::Body {
                        section = Section::Footer;
                        if self.settings.include_comments {
                            gcode.push_str("\n; ========== MACHINING COMPLETE ==========\n");
                        }
                    }
                    let comment = match section {
                        Section::Footer => "Retract tool",
                        _ => "Retract to safe height",
                    };
                    let code = format!("G0 Z{}", format_coord(*z, FRAME_PRECISION));
                    self.push_line(&mut gcode, &code, comment);
                }
                ProgramEntry::FeedRate { rate } => {
                    self.push_line(&mut gcode, &format!("F{}", rate), "Set feed rate");
                }
                ProgramEntry::Move(segment) => match section {
                    Section::Body => {
                        gcode.push_str(&format_move(segment, MOVE_PRECISION));
                        gcode.push('\n');
                    }
                    Section::Header => self.push_line(
                        &mut gcode,
                        &format_move(segment, FRAME_PRECISION),
                        "Move to apex X,Y position",
                    ),
                    Section::Footer => self.push_line(
                        &mut gcode,
                        &format_move(segment, FRAME_PRECISION),
                        "Return to origin",
                    ),
                },
                ProgramEntry::LayerStart { layer, range } => {
                    self.enter_body(&mut gcode, &mut section);
                    if self.settings.include_comments {
                        gcode.push_str(&format!(
                            "\n; ====== Layer {}: Z = {:.3} ======\n",
                            layer.index, layer.depth
                        ));
                        gcode.push_str(&format!("; R = {:.3}, X = {}\n", layer.radius, range));
                    }
                }
                ProgramEntry::LayerSkipped(skipped) => {
                    self.enter_body(&mut gcode, &mut section);
                    if self.settings.include_comments {
                        gcode.push_str(&format!("\n; {}\n", skipped));
                    }
                }
                ProgramEntry::End => {
                    self.push_line(&mut gcode, "M30", "Program end");
                }
            }
        }

        gcode.push_str("%\n");
        gcode
    }

    fn push_banner(&self, gcode: &mut String, params: &ArcSurfaceParameters) {
        let half = params.effective_half_range();
        gcode.push_str(&format!("; {}\n", RULE));
        gcode.push_str(&format!("; {}\n", self.settings.program_title));
        if let Some(generator) = &self.settings.generator {
            gcode.push_str(&format!("; Generated by {}\n", generator));
        }
        gcode.push_str(&format!(
            "; Parameters: R0={}mm, Layers={}, DX={}mm, Depth/layer={}mm\n",
            params.initial_radius, params.layer_count, params.sweep_step, params.depth_per_layer
        ));
        gcode.push_str(&format!(
            "; Arc center: (X={}, Z={}), {}\n",
            params.apex_x, params.center_z, params.surface_orientation
        ));
        gcode.push_str(&format!(
            "; Machining range: X = {:.2} to {:.2} (+/-{}mm from apex)\n",
            params.apex_x - half,
            params.apex_x + half,
            half
        ));
        gcode.push_str(&format!("; Pattern: {}\n", params.pattern));
        if params.z_offset != 0.0 {
            gcode.push_str(&format!("; Z offset applied to all cuts: {}\n", params.z_offset));
        }
        gcode.push_str(&format!("; {}\n\n", RULE));
    }

    fn enter_body(&self, gcode: &mut String, section: &mut Section) {
        if *section == Section::Header {
            *section = Section::Body;
            if self.settings.include_comments {
                gcode.push_str("\n; ========== MAIN MACHINING LOOP ==========\n");
            }
        }
    }

    fn push_line(&self, gcode: &mut String, code: &str, comment: &str) {
        gcode.push_str(code);
        if self.settings.include_comments {
            gcode.push_str(" ; ");
            gcode.push_str(comment);
        }
        gcode.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::assemble;

    fn params() -> ArcSurfaceParameters {
        ArcSurfaceParameters {
            layer_count: 2,
            max_half_range: 1.0,
            tool_radius: 0.0,
            sweep_step: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(1.23456, 3), "1.235");
        assert_eq!(format_coord(5.0, 1), "5.0");
        assert_eq!(format_coord(-0.0001, 3), "0.000");
        assert_eq!(format_coord(-0.5, 3), "-0.500");
    }

    #[test]
    fn test_format_move() {
        assert_eq!(
            format_move(&MotionSegment::feed(1.0, 0.4, -0.1234), 3),
            "G1 X1.000 Y0.400 Z-0.123"
        );
        assert_eq!(
            format_move(&MotionSegment::rapid_xy(0.0, 0.0), 1),
            "G0 X0.0 Y0.0"
        );
    }

    #[test]
    fn test_framing_and_header() {
        let params = params();
        let program = assemble(&params).unwrap();
        let gcode = GcodeWriter::default().write(&program, &params);

        assert!(gcode.starts_with("%\n"));
        assert!(gcode.ends_with("M30 ; Program end\n%\n"));
        assert!(gcode.contains("G90 ; Absolute coordinates"));
        assert!(gcode.contains("G21 ; Metric units"));
        assert!(gcode.contains("F20 ; Set feed rate"));
        assert!(gcode.contains("G0 Z5.0 ; Retract to safe height"));
        assert!(gcode.contains("G0 X0.0 Y0.0 ; Move to apex X,Y position"));
        assert!(gcode.contains("G0 Z5.0 ; Retract tool"));
        assert!(gcode.contains("; ====== Layer 1: Z = -0.100 ======"));
        assert!(gcode.contains("; ====== Layer 2: Z = -0.200 ======"));
    }

    #[test]
    fn test_cut_moves_use_three_decimals() {
        let params = params();
        let program = assemble(&params).unwrap();
        let gcode = GcodeWriter::default().write(&program, &params);
        // zigzag layer 1 starts on the low edge
        assert!(gcode.contains("G0 X-1.000 Y0.000\n"));
        assert!(gcode.contains("G1 X1.000 Y0.400\n"));
    }

    #[test]
    fn test_without_comments() {
        let params = params();
        let program = assemble(&params).unwrap();
        let writer = GcodeWriter::new(GcodeWriterSettings {
            include_comments: false,
            ..Default::default()
        });
        let gcode = writer.write(&program, &params);
        assert!(!gcode.contains(';'));
        assert!(gcode.contains("G0 Z5.0\n"));
        assert!(gcode.contains("M30\n%\n"));
    }

    #[test]
    fn test_generator_line_in_banner() {
        let params = params();
        let program = assemble(&params).unwrap();

        let gcode = GcodeWriter::default().write(&program, &params);
        assert!(!gcode.contains("; Generated by"));

        let writer = GcodeWriter::new(GcodeWriterSettings {
            generator: Some("arcsurf 0.3.0 (built 2026-01-01 00:00:00 UTC)".to_string()),
            ..Default::default()
        });
        let gcode = writer.write(&program, &params);
        let mut lines = gcode.lines();
        assert_eq!(lines.nth(2), Some("; 2.5D Arc Surface Constant-Thickness Scanning"));
        assert_eq!(
            lines.next(),
            Some("; Generated by arcsurf 0.3.0 (built 2026-01-01 00:00:00 UTC)")
        );

        let writer = GcodeWriter::new(GcodeWriterSettings {
            include_comments: false,
            generator: Some("arcsurf".to_string()),
            ..Default::default()
        });
        assert!(!writer.write(&program, &params).contains("Generated"));
    }

    #[test]
    fn test_skipped_layer_comment() {
        let params = ArcSurfaceParameters {
            initial_radius: 0.15,
            center_z: -0.1,
            z_offset: 0.0,
            layer_count: 2,
            tool_radius: 0.0,
            ..Default::default()
        };
        let program = assemble(&params).unwrap();
        let gcode = GcodeWriter::default().write(&program, &params);
        assert!(gcode.contains("; Layer 2: SKIPPED (R=-0.05 <= 0)"));
    }
}
