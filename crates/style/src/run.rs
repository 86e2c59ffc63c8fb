use crate::font::{FontStyle, FontWeight};
use labelgrid_types::Color;
use serde::{Deserialize, Serialize};

/// Character-level properties of a text run. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    pub font_family: Option<String>,
    /// Font size in points.
    pub font_size: Option<f32>,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
    pub color: Option<Color>,
}

impl RunStyle {
    pub fn sized(font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight.is_some_and(|w| w.is_bold())
    }

    pub fn is_italic(&self) -> bool {
        self.style.is_some_and(|s| s.is_italic())
    }

    /// Returns a copy where every property set on `overlay` replaces the one in `self`.
    pub fn merged(&self, overlay: &RunStyle) -> RunStyle {
        RunStyle {
            font_family: overlay.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: overlay.font_size.or(self.font_size),
            weight: overlay.weight.or(self.weight),
            style: overlay.style.or(self.style),
            color: overlay.color.clone().or_else(|| self.color.clone()),
        }
    }
}
