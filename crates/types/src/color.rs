use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color. Template assets and the XML output carry colors as
/// `#RRGGBB` (or the short `#RGB`); serde uses the same text form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// The light gray used for vendor names next to the lineage line.
    pub const fn vendor_gray() -> Self {
        Self::gray(0xA6)
    }

    /// Parses `#RGB` or `#RRGGBB`. The `#` is optional, since Word-style
    /// assets often carry bare `RRGGBB` values.
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid color component '{}': {}", digits, e))
        };

        match hex.len() {
            3 => {
                let mut expanded = [0u8; 3];
                for (i, slot) in expanded.iter_mut().enumerate() {
                    *slot = channel(&hex[i..=i].repeat(2))?;
                }
                Ok(Self::rgb(expanded[0], expanded[1], expanded[2]))
            }
            6 => Ok(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            n => Err(format!("Invalid hex color length: expected 3 or 6, got {}", n)),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::gray(255));
        assert_eq!(Color::parse_hex("A6A6A6").unwrap(), Color::vendor_gray());
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_serde_uses_hex_text() {
        let c = Color::rgb(0x12, 0xAB, 0x0F);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#12AB0F\"");
        let back: Color = serde_json::from_str("\"#12ab0f\"").unwrap();
        assert_eq!(back, c);
    }
}
