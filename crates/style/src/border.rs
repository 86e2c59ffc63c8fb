use crate::text::StyleParseError;
use labelgrid_types::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Single,
    Double,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    pub width: f32,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::None,
            width: 0.0,
            color: Color::default(),
        }
    }
}

impl FromStr for Border {
    type Err = StyleParseError;

    /// Parses the shorthand used by template assets: `"single 0.5 #000000"`.
    /// Width and color are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let style = match parts.next().map(|p| p.to_lowercase()) {
            Some(p) if p == "none" => BorderStyle::None,
            Some(p) if p == "single" || p == "solid" => BorderStyle::Single,
            Some(p) if p == "double" => BorderStyle::Double,
            Some(p) if p == "dashed" => BorderStyle::Dashed,
            Some(p) if p == "dotted" => BorderStyle::Dotted,
            _ => return Err(StyleParseError::InvalidValue("border", s.to_string())),
        };
        let width = match parts.next() {
            Some(w) => w
                .trim_end_matches("pt")
                .parse::<f32>()
                .map_err(|_| StyleParseError::InvalidValue("border width", w.to_string()))?,
            None => 0.5,
        };
        let color = match parts.next() {
            Some(c) => Color::parse_hex(c)
                .map_err(|_| StyleParseError::InvalidValue("border color", c.to_string()))?,
            None => Color::default(),
        };
        Ok(Border { style, width, color })
    }
}

impl std::fmt::Display for Border {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.style.as_str(), self.width, self.color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_shorthand() {
        let b: Border = "single 0.75 #333333".parse().unwrap();
        assert_eq!(b.style, BorderStyle::Single);
        assert_eq!(b.width, 0.75);
        assert_eq!(b.color, Color::gray(0x33));

        let b: Border = "dashed".parse().unwrap();
        assert_eq!(b.width, 0.5);
        assert!("wavy 1".parse::<Border>().is_err());
    }

    #[test]
    fn test_border_display_parses_back() {
        let b: Border = "double 1 #FF0000".parse().unwrap();
        assert_eq!(b.to_string().parse::<Border>().unwrap(), b);
    }
}
