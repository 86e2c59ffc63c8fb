//! Compliance graphic lookup.

use labelgrid_doc::ImageData;
use labelgrid_template::Category;
use labelgrid_types::ResourceUri;
use std::collections::HashMap;

/// Maps a record's compliance value, per category, to a graphic resource.
///
/// Values are matched case-insensitively after trimming. Anything not in
/// the table (including an empty value) resolves to no graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceTable {
    entries: HashMap<(String, Category), ResourceUri>,
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

impl ComplianceTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with(mut self, value: &str, category: Category, uri: &str) -> Self {
        self.entries
            .insert((normalize(value), category), ResourceUri::from(uri));
        self
    }

    /// Same graphic for both categories.
    pub fn with_any(self, value: &str, uri: &str) -> Self {
        self.with(value, Category::Primary, uri)
            .with(value, Category::Secondary, uri)
    }

    /// The graphic for `value`, sized `width` points square.
    pub fn resolve(&self, value: &str, category: Category, width: f32) -> Option<ImageData> {
        if width <= 0.0 {
            return None;
        }
        let uri = self.entries.get(&(normalize(value), category))?;
        Some(ImageData {
            src: Some(uri.clone()),
            data: None,
            content_type: Some("image/png".to_string()),
            width,
            height: width,
            alt: Some(format!("compliance: {}", normalize(value))),
        })
    }
}

impl Default for ComplianceTable {
    fn default() -> Self {
        Self::empty()
            .with_any("YES", "compliance/doh.png")
            .with_any("DOH", "compliance/doh.png")
            .with("HIGH CBD", Category::Primary, "compliance/doh-high-cbd.png")
            .with("HIGH CBD", Category::Secondary, "compliance/doh-high-cbd.png")
            .with("GENERAL USE", Category::Secondary, "compliance/doh-general.png")
    }
}
