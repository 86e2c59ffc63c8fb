use labelgrid_doc::ImageData;
use labelgrid_markers::MarkerField;
use std::collections::BTreeMap;
use std::fmt;

/// A context key, referenced from templates as `{{LabelN.<key>}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelField {
    ProductBrand,
    /// Lineage (or brand, for secondary products) plus the vendor.
    Lineage,
    DescAndWeight,
    Ratio,
    Price,
    ProductStrain,
    ProductType,
    /// Compliance graphic.
    Doh,
    /// Identifier graphic.
    Qr,
}

impl LabelField {
    pub const ALL: [LabelField; 9] = [
        LabelField::ProductBrand,
        LabelField::Lineage,
        LabelField::DescAndWeight,
        LabelField::Ratio,
        LabelField::Price,
        LabelField::ProductStrain,
        LabelField::ProductType,
        LabelField::Doh,
        LabelField::Qr,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LabelField::ProductBrand => "ProductBrand",
            LabelField::Lineage => "Lineage",
            LabelField::DescAndWeight => "DescAndWeight",
            LabelField::Ratio => "Ratio",
            LabelField::Price => "Price",
            LabelField::ProductStrain => "ProductStrain",
            LabelField::ProductType => "ProductType",
            LabelField::Doh => "DOH",
            LabelField::Qr => "QR",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// The marker wrapping this field's text, or `None` for graphics.
    pub fn marker(self) -> Option<MarkerField> {
        match self {
            LabelField::ProductBrand => Some(MarkerField::ProductBrand),
            LabelField::Lineage => Some(MarkerField::Lineage),
            LabelField::DescAndWeight => Some(MarkerField::Description),
            LabelField::Ratio => Some(MarkerField::Ratio),
            LabelField::Price => Some(MarkerField::Price),
            LabelField::ProductStrain => Some(MarkerField::ProductStrain),
            LabelField::ProductType => Some(MarkerField::ProductType),
            LabelField::Doh | LabelField::Qr => None,
        }
    }

    pub fn is_graphic(self) -> bool {
        self.marker().is_none()
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Marker-wrapped display text. May be empty.
    Text(String),
    Graphic(ImageData),
}

impl ContextValue {
    pub fn empty() -> Self {
        ContextValue::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContextValue::Text(t) => Some(t),
            ContextValue::Graphic(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ContextValue::Text(t) if t.is_empty())
    }
}

/// Whether a product shows its lineage (primary) or its brand (secondary)
/// on the lineage line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Primary,
    Secondary,
}

/// The content of one label cell, keyed by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelContext {
    values: BTreeMap<LabelField, ContextValue>,
    category: Category,
}

impl LabelContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with every given field present and empty.
    pub fn blank(fields: &[LabelField]) -> Self {
        Self {
            values: fields.iter().map(|f| (*f, ContextValue::empty())).collect(),
            category: Category::default(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set(&mut self, field: LabelField, value: ContextValue) {
        self.values.insert(field, value);
    }

    pub fn set_text(&mut self, field: LabelField, text: impl Into<String>) {
        self.values.insert(field, ContextValue::Text(text.into()));
    }

    pub fn get(&self, field: LabelField) -> Option<&ContextValue> {
        self.values.get(&field)
    }

    /// Text of a field; empty for graphics and absent fields.
    pub fn text(&self, field: LabelField) -> &str {
        self.values.get(&field).and_then(ContextValue::as_text).unwrap_or("")
    }

    pub fn contains(&self, field: LabelField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = LabelField> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
