//! Primary/secondary classification and the combined lineage line.

use crate::fields;
use crate::normalize::clean_text;
use labelgrid_markers::{MarkerField, wrap};
use labelgrid_template::{Category, KindSpec};
use labelgrid_traits::LineageLookup;
use labelgrid_types::Record;
use std::collections::HashSet;

/// Product types that print a lineage. Matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryCategories(HashSet<String>);

impl PrimaryCategories {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            types
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, product_type: &str) -> bool {
        self.0.contains(&product_type.trim().to_lowercase())
    }
}

/// Product types treated as primary unless configured otherwise.
pub const DEFAULT_PRIMARY_TYPES: &[&str] = &[
    "flower",
    "pre-roll",
    "infused pre-roll",
    "concentrate",
    "solventless concentrate",
    "vape cartridge",
];

impl Default for PrimaryCategories {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_TYPES)
    }
}

pub fn classify(record: &Record, primary: &PrimaryCategories) -> Category {
    if primary.contains(&record.text(fields::PRODUCT_TYPE)) {
        Category::Primary
    } else {
        Category::Secondary
    }
}

/// The lineage to print: the store's canonical lineage for the record's
/// strain, else the record's own lineage. Always upper-cased.
///
/// Lookup failures are logged and treated as "no match".
pub fn resolve_lineage(record: &Record, lookup: &dyn LineageLookup) -> String {
    let own = || clean_text(&record.text(fields::LINEAGE)).to_uppercase();
    let strain = record.text(fields::PRODUCT_STRAIN);
    if strain.is_empty() {
        return own();
    }
    match lookup.lookup(&strain) {
        Ok(Some(info)) if !info.canonical_lineage.trim().is_empty() => {
            info.canonical_lineage.trim().to_uppercase()
        }
        Ok(_) => own(),
        Err(e) => {
            log::warn!(
                "Lineage lookup via {} failed for '{}', using record lineage: {}",
                lookup.name(),
                strain,
                e
            );
            own()
        }
    }
}

/// Builds the marker-wrapped lineage line.
///
/// Primary products show the lineage and, right-aligned by a tab, the
/// vendor. When both do not fit the kind's budget (or the lineage is one the
/// kind always splits), the vendor moves to its own line. Secondary products
/// show the brand in the lineage slot and no vendor.
pub fn lineage_line(
    spec: &KindSpec,
    category: Category,
    lineage: &str,
    brand: &str,
    vendor: &str,
) -> String {
    match category {
        Category::Secondary if brand.is_empty() => String::new(),
        Category::Secondary => wrap(MarkerField::Lineage, brand),
        Category::Primary => {
            let mut line = if lineage.is_empty() {
                String::new()
            } else {
                wrap(MarkerField::Lineage, lineage)
            };
            if vendor.is_empty() {
                return line;
            }
            let combined = lineage.chars().count() + 1 + vendor.chars().count();
            let forced = spec
                .rules
                .force_split_lineages
                .iter()
                .any(|l| l.eq_ignore_ascii_case(lineage));
            if !lineage.is_empty() && (forced || combined > spec.rules.combined_line_budget) {
                line.push('\n');
            }
            line.push('\t');
            line.push_str(&wrap(MarkerField::Vendor, vendor));
            line
        }
    }
}
