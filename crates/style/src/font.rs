use crate::text::StyleParseError;
use serde::{Deserialize, Serialize};

/// Run weight. Assets write it as a word (`bold`), a Word-style toggle
/// (`true`/`1`) or a numeric weight (`600`); output always uses the number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", from = "u16")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Bold,
    Numeric(u16),
}

impl FontWeight {
    /// The 100-900 weight value.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
            FontWeight::Numeric(n) => *n,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }

    pub fn parse(s: &str) -> Result<Self, StyleParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(FontWeight::Light),
            "regular" | "normal" | "false" | "0" => Ok(FontWeight::Regular),
            "bold" | "true" | "1" => Ok(FontWeight::Bold),
            other => other
                .parse::<u16>()
                .ok()
                .filter(|n| (100..=900).contains(n))
                .map(FontWeight::from)
                .ok_or_else(|| StyleParseError::InvalidValue("font weight", s.to_string())),
        }
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        match value {
            300 => FontWeight::Light,
            400 => FontWeight::Regular,
            700 => FontWeight::Bold,
            n => FontWeight::Numeric(n),
        }
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.numeric_value()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic)
    }
}
