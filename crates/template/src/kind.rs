//! The closed set of label layouts and their static geometry and rules.

use crate::context::LabelField;
use labelgrid_markers::MarkerField;
use labelgrid_types::{POINTS_PER_INCH, Size};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A label layout. Every kind has a fixed grid, a fixed physical cell size
/// and its own sizing and alignment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TemplateKind {
    /// Kind A: 3×3 landscape labels.
    Horizontal,
    /// Kind B: 4×5 small square labels.
    Mini,
    /// Kind C: 4×3 labels, two lineage lines when needed.
    Double,
    /// Kind D: 2×2 inventory slips with a reduced field set.
    Inventory,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Horizontal,
        TemplateKind::Mini,
        TemplateKind::Double,
        TemplateKind::Inventory,
    ];

    pub fn spec(self) -> &'static KindSpec {
        match self {
            TemplateKind::Horizontal => &HORIZONTAL,
            TemplateKind::Mini => &MINI,
            TemplateKind::Double => &DOUBLE,
            TemplateKind::Inventory => &INVENTORY,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Cells per page.
    pub fn capacity(self) -> usize {
        let spec = self.spec();
        spec.rows * spec.cols
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    /// Accepts the kind's name or its letter, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "horizontal" => Ok(TemplateKind::Horizontal),
            "b" | "mini" => Ok(TemplateKind::Mini),
            "c" | "double" => Ok(TemplateKind::Double),
            "d" | "inventory" => Ok(TemplateKind::Inventory),
            other => Err(format!(
                "unknown template kind '{}' (expected horizontal, mini, double or inventory)",
                other
            )),
        }
    }
}

impl TryFrom<String> for TemplateKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Once content is longer than `over` characters, the size drops to `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeStep {
    pub over: usize,
    pub size: f32,
}

/// Sizing rule for one marker field within one kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontRule {
    pub field: MarkerField,
    pub base: f32,
    /// Sorted by `over`; sizes never increase.
    pub steps: &'static [SizeStep],
}

/// Kind-specific business rules consulted by the context builder and the
/// sizing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindRules {
    /// Longest lineage + vendor text kept on one tab-justified line.
    pub combined_line_budget: usize,
    /// Lineage values that always get their own line above the vendor.
    pub force_split_lineages: &'static [&'static str],
    /// Placed between description and weight.
    pub desc_weight_joiner: &'static str,
    /// Rendered width of the compliance graphic, in points.
    pub compliance_width: f32,
    /// Rendered edge length of the identifier graphic, in points.
    pub qr_size: f32,
    /// Ratio paragraphs are right-aligned instead of centered.
    pub ratio_right_aligned: bool,
    /// Line spacing applied to ratio paragraphs, if any.
    pub ratio_line_spacing: Option<f32>,
}

/// Static description of one template kind.
#[derive(Debug, Clone, PartialEq)]
pub struct KindSpec {
    pub kind: TemplateKind,
    pub name: &'static str,
    pub rows: usize,
    pub cols: usize,
    /// Width and height of one cell, in inches.
    pub cell_inches: (f32, f32),
    /// Default template asset identifier.
    pub asset: &'static str,
    /// Context keys this kind recognizes.
    pub fields: &'static [LabelField],
    pub fonts: &'static [FontRule],
    /// No computed size goes below this, before scaling.
    pub min_font_size: f32,
    pub rules: KindRules,
}

impl KindSpec {
    pub fn cell_size(&self) -> Size {
        Size::from_inches(self.cell_inches.0, self.cell_inches.1)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn font_rule(&self, field: MarkerField) -> Option<&FontRule> {
        self.fonts.iter().find(|r| r.field == field)
    }

    pub fn recognizes(&self, field: LabelField) -> bool {
        self.fields.contains(&field)
    }

    /// Right tab stop for the vendor on the lineage line: the cell width
    /// less a quarter inch of padding.
    pub fn vendor_tab_stop(&self) -> f32 {
        self.cell_size().width - POINTS_PER_INCH / 4.0
    }
}

const fn step(over: usize, size: f32) -> SizeStep {
    SizeStep { over, size }
}

const fn rule(field: MarkerField, base: f32, steps: &'static [SizeStep]) -> FontRule {
    FontRule { field, base, steps }
}

const FULL_FIELDS: &[LabelField] = &[
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

static HORIZONTAL: KindSpec = KindSpec {
    kind: TemplateKind::Horizontal,
    name: "horizontal",
    rows: 3,
    cols: 3,
    cell_inches: (3.3, 2.4),
    asset: "horizontal.xml",
    fields: FULL_FIELDS,
    fonts: &[
        rule(MarkerField::ProductBrand, 16.0, &[step(20, 14.0), step(30, 12.0), step(40, 10.0)]),
        rule(MarkerField::Lineage, 16.0, &[step(20, 14.0), step(30, 12.0)]),
        rule(MarkerField::Vendor, 12.0, &[step(20, 10.0), step(30, 8.0)]),
        rule(MarkerField::Description, 28.0, &[step(20, 24.0), step(40, 20.0), step(60, 16.0), step(80, 14.0)]),
        rule(MarkerField::Ratio, 12.0, &[step(20, 10.0), step(40, 9.0)]),
        rule(MarkerField::Price, 38.0, &[step(4, 36.0), step(6, 32.0), step(8, 28.0)]),
        rule(MarkerField::ProductStrain, 8.0, &[]),
        rule(MarkerField::ProductType, 12.0, &[step(15, 10.0)]),
    ],
    min_font_size: 8.0,
    rules: KindRules {
        combined_line_budget: 34,
        force_split_lineages: &[],
        desc_weight_joiner: "\n",
        compliance_width: 0.75 * POINTS_PER_INCH,
        qr_size: 0.75 * POINTS_PER_INCH,
        ratio_right_aligned: true,
        ratio_line_spacing: Some(0.9),
    },
};

static MINI: KindSpec = KindSpec {
    kind: TemplateKind::Mini,
    name: "mini",
    rows: 4,
    cols: 5,
    cell_inches: (1.75, 1.75),
    asset: "mini.xml",
    fields: FULL_FIELDS,
    fonts: &[
        rule(MarkerField::ProductBrand, 10.0, &[step(15, 9.0), step(25, 8.0), step(35, 7.0)]),
        rule(MarkerField::Lineage, 10.0, &[step(12, 9.0), step(20, 8.0)]),
        rule(MarkerField::Vendor, 8.0, &[step(15, 7.0), step(25, 6.0)]),
        rule(MarkerField::Description, 14.0, &[step(15, 12.0), step(30, 10.0), step(45, 9.0), step(60, 8.0)]),
        rule(MarkerField::Ratio, 8.0, &[step(20, 7.0)]),
        rule(MarkerField::Price, 18.0, &[step(4, 16.0), step(6, 14.0), step(8, 12.0)]),
        rule(MarkerField::ProductStrain, 6.0, &[]),
        rule(MarkerField::ProductType, 8.0, &[step(12, 7.0)]),
    ],
    min_font_size: 6.0,
    rules: KindRules {
        combined_line_budget: 18,
        force_split_lineages: &[],
        desc_weight_joiner: "\u{00A0}-\u{00A0}",
        compliance_width: 0.4 * POINTS_PER_INCH,
        qr_size: 0.5 * POINTS_PER_INCH,
        ratio_right_aligned: false,
        ratio_line_spacing: None,
    },
};

static DOUBLE: KindSpec = KindSpec {
    kind: TemplateKind::Double,
    name: "double",
    rows: 4,
    cols: 3,
    cell_inches: (2.5, 1.75),
    asset: "double.xml",
    fields: FULL_FIELDS,
    fonts: &[
        rule(MarkerField::ProductBrand, 12.0, &[step(18, 11.0), step(28, 10.0), step(38, 8.0)]),
        rule(MarkerField::Lineage, 12.0, &[step(14, 11.0), step(22, 10.0)]),
        rule(MarkerField::Vendor, 9.0, &[step(18, 8.0), step(28, 7.0)]),
        rule(MarkerField::Description, 18.0, &[step(18, 16.0), step(32, 14.0), step(50, 12.0), step(70, 10.0)]),
        rule(MarkerField::Ratio, 9.0, &[step(20, 8.0), step(40, 7.0)]),
        rule(MarkerField::Price, 24.0, &[step(4, 22.0), step(6, 20.0), step(8, 16.0)]),
        rule(MarkerField::ProductStrain, 7.0, &[]),
        rule(MarkerField::ProductType, 9.0, &[step(14, 8.0)]),
    ],
    min_font_size: 7.0,
    rules: KindRules {
        combined_line_budget: 24,
        force_split_lineages: &["HYBRID/INDICA", "HYBRID/SATIVA"],
        desc_weight_joiner: "\n",
        compliance_width: 0.5 * POINTS_PER_INCH,
        qr_size: 0.6 * POINTS_PER_INCH,
        ratio_right_aligned: false,
        ratio_line_spacing: None,
    },
};

static INVENTORY: KindSpec = KindSpec {
    kind: TemplateKind::Inventory,
    name: "inventory",
    rows: 2,
    cols: 2,
    cell_inches: (4.0, 2.75),
    asset: "inventory.xml",
    fields: &[
        LabelField::ProductBrand,
        LabelField::Lineage,
        LabelField::DescAndWeight,
        LabelField::Price,
        LabelField::ProductStrain,
        LabelField::Qr,
    ],
    fonts: &[
        rule(MarkerField::ProductBrand, 14.0, &[step(25, 12.0), step(40, 10.0)]),
        rule(MarkerField::Lineage, 14.0, &[step(20, 12.0)]),
        rule(MarkerField::Vendor, 11.0, &[step(25, 9.0)]),
        rule(MarkerField::Description, 20.0, &[step(25, 18.0), step(50, 14.0), step(80, 12.0)]),
        rule(MarkerField::Price, 24.0, &[step(6, 20.0), step(8, 18.0)]),
        rule(MarkerField::ProductStrain, 9.0, &[]),
    ],
    min_font_size: 9.0,
    rules: KindRules {
        combined_line_budget: 40,
        force_split_lineages: &[],
        desc_weight_joiner: "\n",
        compliance_width: 0.0,
        qr_size: 1.0 * POINTS_PER_INCH,
        ratio_right_aligned: false,
        ratio_line_spacing: None,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_matches_kind() {
        let dims: Vec<(usize, usize)> = TemplateKind::ALL
            .iter()
            .map(|k| (k.spec().rows, k.spec().cols))
            .collect();
        assert_eq!(dims, vec![(3, 3), (4, 5), (4, 3), (2, 2)]);
        assert_eq!(TemplateKind::Mini.capacity(), 20);
        assert_eq!(TemplateKind::Horizontal.spec().cell_size().width, 3.3 * POINTS_PER_INCH);
    }

    #[test]
    fn test_font_tables_step_down() {
        for kind in TemplateKind::ALL {
            let spec = kind.spec();
            for rule in spec.fonts {
                let mut last_over = 0;
                let mut last_size = rule.base;
                for step in rule.steps {
                    assert!(step.over > last_over || last_over == 0, "{kind} {}", rule.field);
                    assert!(step.size <= last_size, "{kind} {}", rule.field);
                    last_over = step.over;
                    last_size = step.size;
                }
                assert!(rule.base >= spec.min_font_size);
            }
        }
    }

    #[test]
    fn test_parses_names_and_letters() {
        assert_eq!("A".parse::<TemplateKind>(), Ok(TemplateKind::Horizontal));
        assert_eq!(" mini ".parse::<TemplateKind>(), Ok(TemplateKind::Mini));
        assert_eq!("c".parse::<TemplateKind>(), Ok(TemplateKind::Double));
        assert_eq!("Inventory".parse::<TemplateKind>(), Ok(TemplateKind::Inventory));
        assert!("vertical".parse::<TemplateKind>().is_err());
    }

    #[test]
    fn test_only_double_force_splits() {
        for kind in TemplateKind::ALL {
            let forced = !kind.spec().rules.force_split_lineages.is_empty();
            assert_eq!(forced, kind == TemplateKind::Double);
        }
    }

    #[test]
    fn test_inventory_has_reduced_fields() {
        let spec = TemplateKind::Inventory.spec();
        assert!(!spec.recognizes(LabelField::Ratio));
        assert!(!spec.recognizes(LabelField::Doh));
        assert!(spec.recognizes(LabelField::Price));
    }
}
