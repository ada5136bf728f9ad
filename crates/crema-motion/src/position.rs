//! Placement of a step on a timeline.

use std::str::FromStr;

use crate::error::{MotionError, Result};

/// Where a step starts, relative to what is already on the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Position {
    /// At the current end of the timeline.
    #[default]
    Append,
    /// At an absolute time in seconds.
    Absolute(f32),
    /// Offset from the current end of the timeline (`"+=0.1"`, `"-=1.2"`).
    FromEnd(f32),
    /// Offset from the previous step's start (`"<"`, `"<0.5"`).
    PrevStart(f32),
    /// Offset from the previous step's end (`">"`, `">0.5"`).
    PrevEnd(f32),
}

impl Position {
    /// Resolve to an absolute start time. Never negative.
    pub fn resolve(&self, timeline_end: f32, prev_start: f32, prev_end: f32) -> f32 {
        let t = match *self {
            Position::Append => timeline_end,
            Position::Absolute(t) => t,
            Position::FromEnd(d) => timeline_end + d,
            Position::PrevStart(d) => prev_start + d,
            Position::PrevEnd(d) => prev_end + d,
        };
        t.max(0.0)
    }
}

fn parse_offset(s: &str, whole: &str) -> Result<f32> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let s = s.strip_prefix("+=").unwrap_or(s);
    let (sign, s) = match s.strip_prefix("-=") {
        Some(rest) => (-1.0, rest),
        None => (1.0, s),
    };
    s.parse::<f32>()
        .map(|v| sign * v)
        .map_err(|_| MotionError::InvalidPosition(whole.to_string()))
}

impl FromStr for Position {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Position::Append);
        }
        if let Some(rest) = trimmed.strip_prefix('<') {
            return Ok(Position::PrevStart(parse_offset(rest, s)?));
        }
        if let Some(rest) = trimmed.strip_prefix('>') {
            return Ok(Position::PrevEnd(parse_offset(rest, s)?));
        }
        if let Some(rest) = trimmed.strip_prefix("+=") {
            return Ok(Position::FromEnd(parse_offset(rest, s)?));
        }
        if let Some(rest) = trimmed.strip_prefix("-=") {
            return Ok(Position::FromEnd(-parse_offset(rest, s)?));
        }
        trimmed
            .parse::<f32>()
            .map(Position::Absolute)
            .map_err(|_| MotionError::InvalidPosition(s.to_string()))
    }
}
