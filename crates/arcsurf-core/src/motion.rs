//! Motion primitives emitted by the toolpath engine
//!
//! A program is an ordered list of linear moves. Each move starts where the
//! previous one ended, so a [`Position`] cursor is enough to follow a program.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speed class of a linear move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Non-cutting move at maximum traverse speed
    Rapid,
    /// Feed-rate controlled move, tool in contact with material
    Feed,
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "rapid"),
            Self::Feed => write!(f, "feed"),
        }
    }
}

/// Tool tip position in machine coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite() && z.is_finite(),
            "Position axes must be finite: x={x}, y={y}, z={z}"
        );
        Self { x, y, z }
    }

    /// Distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True when X and Y match `other` (Z ignored)
    pub fn same_lateral(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A single linear move
///
/// `z` is `None` when the move holds the current Z height (a 2D move).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSegment {
    pub kind: MotionKind,
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl MotionSegment {
    /// Rapid move to a 3D position
    pub fn rapid(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: MotionKind::Rapid,
            x,
            y,
            z: Some(z),
        }
    }

    /// Rapid move in the XY plane, Z held
    pub fn rapid_xy(x: f64, y: f64) -> Self {
        Self {
            kind: MotionKind::Rapid,
            x,
            y,
            z: None,
        }
    }

    /// Feed move to a 3D position
    pub fn feed(x: f64, y: f64, z: f64) -> Self {
        Self {
            kind: MotionKind::Feed,
            x,
            y,
            z: Some(z),
        }
    }

    /// Feed move in the XY plane, Z held
    pub fn feed_xy(x: f64, y: f64) -> Self {
        Self {
            kind: MotionKind::Feed,
            x,
            y,
            z: None,
        }
    }

    pub fn is_rapid(&self) -> bool {
        self.kind == MotionKind::Rapid
    }

    /// Position reached after executing this move from `from`
    pub fn end_from(&self, from: Position) -> Position {
        Position {
            x: self.x,
            y: self.y,
            z: self.z.unwrap_or(from.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_z_keeps_previous_height() {
        let start = Position::new(1.0, 2.0, -3.0);
        let end = MotionSegment::feed_xy(4.0, 2.0).end_from(start);
        assert_eq!(end, Position::new(4.0, 2.0, -3.0));

        let end = MotionSegment::rapid(0.0, 0.0, 5.0).end_from(start);
        assert_eq!(end.z, 5.0);
    }

    #[test]
    fn test_distance_and_lateral_match() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!(!a.same_lateral(&b));
        assert!(a.same_lateral(&Position::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_motion_kind_display() {
        assert_eq!(MotionKind::Rapid.to_string(), "rapid");
        assert_eq!(MotionKind::Feed.to_string(), "feed");
        assert!(MotionSegment::rapid_xy(0.0, 0.0).is_rapid());
    }
}
