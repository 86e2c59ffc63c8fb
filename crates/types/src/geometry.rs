use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Builds a size from dimensions given in inches.
    pub fn from_inches(width: f32, height: f32) -> Self {
        Self {
            width: width * POINTS_PER_INCH,
            height: height * POINTS_PER_INCH,
        }
    }
}

/// A physical length, always stored in points.
///
/// Template assets write lengths as `"3.3in"`, `"24pt"`, `"2.5cm"` or a bare
/// number of points.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Length(pub f32);

impl Length {
    pub fn pt(points: f32) -> Self {
        Self(points)
    }

    pub fn inches(inches: f32) -> Self {
        Self(inches * POINTS_PER_INCH)
    }

    pub fn points(self) -> f32 {
        self.0
    }
}

impl FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (number, factor) = if let Some(v) = s.strip_suffix("in") {
            (v, POINTS_PER_INCH)
        } else if let Some(v) = s.strip_suffix("cm") {
            (v, POINTS_PER_INCH / 2.54)
        } else if let Some(v) = s.strip_suffix("mm") {
            (v, POINTS_PER_INCH / 25.4)
        } else if let Some(v) = s.strip_suffix("pt") {
            (v, 1.0)
        } else {
            (s, 1.0)
        };
        number
            .trim()
            .parse::<f32>()
            .map(|n| Length(n * factor))
            .map_err(|_| format!("Invalid length: '{}'", s))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", (self.0 * 100.0).round() / 100.0)
    }
}
