use crate::text::TextAlign;
use serde::{Deserialize, Serialize};

/// A tab stop, positioned in points from the paragraph's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabStop {
    pub position: f32,
    pub align: TextAlign,
}

/// Paragraph-level properties. `None` means "inherit from the template".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    pub align: Option<TextAlign>,
    /// Line spacing as a multiple of the font's natural line height.
    pub line_spacing: Option<f32>,
    pub space_after: Option<f32>,
    pub tab_stops: Vec<TabStop>,
}

impl ParagraphStyle {
    pub fn aligned(align: TextAlign) -> Self {
        Self {
            align: Some(align),
            ..Default::default()
        }
    }

    /// Adds a right-aligned tab stop unless one already exists at that position.
    pub fn add_right_tab(&mut self, position: f32) {
        let exists = self
            .tab_stops
            .iter()
            .any(|t| t.align == TextAlign::Right && (t.position - position).abs() < 0.01);
        if !exists {
            self.tab_stops.push(TabStop {
                position,
                align: TextAlign::Right,
            });
        }
    }
}
