//! Program statistics

use crate::program::{Program, ProgramEntry};
use arcsurf_core::{MotionKind, Position};
use serde::Serialize;

/// Summary of an assembled program
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramStats {
    pub rapid_moves: usize,
    pub feed_moves: usize,
    pub planned_layers: usize,
    pub skipped_layers: usize,
    /// Path length travelled at feed rate (mm)
    pub feed_length: f64,
    /// Path length travelled at rapid speed (mm)
    pub rapid_length: f64,
    /// Feed length divided by feed rate (minutes)
    pub estimated_cut_minutes: f64,
}

/// Walks a program and accumulates [`ProgramStats`]
#[derive(Debug)]
pub struct StatsCalculator;

impl StatsCalculator {
    /// `start` is the tool position before the first entry runs.
    pub fn calculate(program: &Program, start: Position) -> ProgramStats {
        let mut stats = ProgramStats::default();
        let mut cursor = start;
        let mut feed_rate = 0.0;

        for entry in &program.entries {
            match entry {
                ProgramEntry::Retract { z } => {
                    let next = Position { z: *z, ..cursor };
                    stats.rapid_moves += 1;
                    stats.rapid_length += cursor.distance_to(&next);
                    cursor = next;
                }
                ProgramEntry::FeedRate { rate } => feed_rate = *rate,
                ProgramEntry::Move(segment) => {
                    let next = segment.end_from(cursor);
                    let length = cursor.distance_to(&next);
                    match segment.kind {
                        MotionKind::Rapid => {
                            stats.rapid_moves += 1;
                            stats.rapid_length += length;
                        }
                        MotionKind::Feed => {
                            stats.feed_moves += 1;
                            stats.feed_length += length;
                        }
                    }
                    cursor = next;
                }
                ProgramEntry::LayerStart { .. } => stats.planned_layers += 1,
                ProgramEntry::LayerSkipped(_) => stats.skipped_layers += 1,
                ProgramEntry::End => {}
            }
        }

        if feed_rate > 0.0 {
            stats.estimated_cut_minutes = stats.feed_length / feed_rate;
        }
        stats
    }
}
