use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Invalid {0}: '{1}'")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

impl FromStr for TextAlign {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "start" => Ok(TextAlign::Left),
            "right" | "end" => Ok(TextAlign::Right),
            "center" | "centre" => Ok(TextAlign::Center),
            "justify" | "both" => Ok(TextAlign::Justify),
            _ => Err(StyleParseError::InvalidValue("text alignment", s.to_string())),
        }
    }
}
