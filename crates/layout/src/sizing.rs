//! Font size and style of one marker span.

use labelgrid_markers::MarkerField;
use labelgrid_style::{FontStyle, FontWeight, RunStyle, TextAlign};
use labelgrid_template::{Category, TemplateKind};
use labelgrid_types::Color;

/// Characters counted towards a span's length. Line and tab sentinels are
/// layout, not content.
fn content_len(content: &str) -> usize {
    content.chars().filter(|c| !matches!(c, '\n' | '\t' | '\r')).count()
}

/// Point size for `content` rendered as `field` on a `kind` label.
///
/// The size starts at the field's base, steps down as the content length
/// passes each threshold, is floored at the kind's minimum and finally
/// multiplied by `scale`. Strain names always use the minimum. Fields the
/// kind has no rule for also use the minimum.
///
/// For a fixed field and kind the result never grows with content length.
pub fn font_size(content: &str, field: MarkerField, kind: TemplateKind, scale: f32) -> f32 {
    let spec = kind.spec();
    let floor = spec.min_font_size;
    let rule = match spec.font_rule(field) {
        Some(rule) if field != MarkerField::ProductStrain => rule,
        _ => return floor * scale,
    };

    let len = content_len(content);
    let stepped = rule
        .steps
        .iter()
        .filter(|step| len > step.over)
        .map(|step| step.size)
        .fold(rule.base, f32::min);
    stepped.max(floor) * scale
}

/// Run and paragraph styling of one materialized span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanStyle {
    /// Overlay merged onto the paragraph's authored run style.
    pub run: RunStyle,
    /// Paragraph alignment this span asks for, if any.
    pub align: Option<TextAlign>,
    pub line_spacing: Option<f32>,
}

/// Styling side effects of each field:
/// lineage is left-aligned for primary products and centered for secondary
/// ones, brand is centered, vendor is right-aligned italic gray, ratio is
/// bold (and right-aligned with tighter spacing where the kind says so).
pub fn span_style(field: MarkerField, category: Category, kind: TemplateKind, size: f32) -> SpanStyle {
    let rules = &kind.spec().rules;
    let mut style = SpanStyle {
        run: RunStyle::sized(size),
        align: None,
        line_spacing: None,
    };
    match field {
        MarkerField::Lineage => {
            style.align = Some(match category {
                Category::Primary => TextAlign::Left,
                Category::Secondary => TextAlign::Center,
            });
        }
        MarkerField::ProductBrand => style.align = Some(TextAlign::Center),
        MarkerField::Vendor => {
            style.align = Some(TextAlign::Right);
            style.run.style = Some(FontStyle::Italic);
            style.run.color = Some(Color::vendor_gray());
        }
        MarkerField::Ratio => {
            style.run.weight = Some(FontWeight::Bold);
            if rules.ratio_right_aligned {
                style.align = Some(TextAlign::Right);
                style.line_spacing = rules.ratio_line_spacing;
            }
        }
        MarkerField::Description
        | MarkerField::Price
        | MarkerField::ProductStrain
        | MarkerField::ProductType => {}
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_never_grows_with_length() {
        for kind in TemplateKind::ALL {
            for field in MarkerField::ALL {
                let mut last = f32::INFINITY;
                for len in 0..200 {
                    let size = font_size(&"x".repeat(len), field, kind, 1.0);
                    assert!(size <= last, "{kind} {field} grew at length {len}");
                    assert!(size >= kind.spec().min_font_size);
                    last = size;
                }
            }
        }
    }

    #[test]
    fn test_steps_and_floor() {
        let kind = TemplateKind::Horizontal;
        assert_eq!(font_size("$5", MarkerField::Price, kind, 1.0), 38.0);
        assert_eq!(font_size("$1,250.00", MarkerField::Price, kind, 1.0), 28.0);
        assert_eq!(font_size(&"d".repeat(500), MarkerField::Description, kind, 1.0), 14.0);
    }

    #[test]
    fn test_strain_is_pinned_to_minimum() {
        for kind in TemplateKind::ALL {
            let min = kind.spec().min_font_size;
            assert_eq!(font_size("OG", MarkerField::ProductStrain, kind, 1.0), min);
            assert_eq!(font_size("OG", MarkerField::ProductStrain, kind, 2.0), min * 2.0);
        }
    }

    #[test]
    fn test_scale_applies_after_floor() {
        let kind = TemplateKind::Mini;
        let base = font_size("Acme", MarkerField::ProductBrand, kind, 1.0);
        assert_eq!(font_size("Acme", MarkerField::ProductBrand, kind, 0.5), base * 0.5);
    }

    #[test]
    fn test_multi_line_content_is_sized_as_one_string() {
        let kind = TemplateKind::Double;
        let joined = font_size("100mg THC\n5mg CBD", MarkerField::Ratio, kind, 1.0);
        assert_eq!(joined, font_size("100mg THC5mg CBD", MarkerField::Ratio, kind, 1.0));
    }

    #[test]
    fn test_alignment_side_effects() {
        let kind = TemplateKind::Horizontal;
        let lineage = span_style(MarkerField::Lineage, Category::Primary, kind, 12.0);
        assert_eq!(lineage.align, Some(TextAlign::Left));
        let brand_slot = span_style(MarkerField::Lineage, Category::Secondary, kind, 12.0);
        assert_eq!(brand_slot.align, Some(TextAlign::Center));

        let vendor = span_style(MarkerField::Vendor, Category::Primary, kind, 10.0);
        assert!(vendor.run.is_italic());
        assert_eq!(vendor.run.color, Some(Color::vendor_gray()));

        let ratio_a = span_style(MarkerField::Ratio, Category::Primary, kind, 10.0);
        assert!(ratio_a.run.is_bold());
        assert_eq!(ratio_a.align, Some(TextAlign::Right));
        assert!(ratio_a.line_spacing.is_some());

        let ratio_b = span_style(MarkerField::Ratio, Category::Primary, TemplateKind::Mini, 10.0);
        assert!(ratio_b.run.is_bold());
        assert_eq!(ratio_b.align, None);
    }
}
