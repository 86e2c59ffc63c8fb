use crate::category::{PrimaryCategories, classify, lineage_line, resolve_lineage};
use crate::compliance::ComplianceTable;
use crate::fields;
use crate::normalize::{clean_text, desc_and_weight, format_price, format_ratio};
use crate::qr::QrCache;
use labelgrid_markers::wrap;
use labelgrid_template::{Category, ContextValue, LabelContext, LabelField, TemplateKind};
use labelgrid_traits::{LineageLookup, NoLineageLookup};
use labelgrid_types::Record;
use std::sync::Arc;

/// Maps records to label contexts for one template kind.
///
/// Building a context never fails: every field the kind recognizes is
/// present in the result, empty when the record has nothing for it.
#[derive(Debug, Clone)]
pub struct LabelContextBuilder {
    kind: TemplateKind,
    primary: PrimaryCategories,
    lineage: Arc<dyn LineageLookup>,
    compliance: ComplianceTable,
}

impl LabelContextBuilder {
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            primary: PrimaryCategories::default(),
            lineage: Arc::new(NoLineageLookup),
            compliance: ComplianceTable::default(),
        }
    }

    pub fn with_primary_categories(mut self, primary: PrimaryCategories) -> Self {
        self.primary = primary;
        self
    }

    pub fn with_lineage_lookup(mut self, lookup: Arc<dyn LineageLookup>) -> Self {
        self.lineage = lookup;
        self
    }

    pub fn with_compliance_table(mut self, table: ComplianceTable) -> Self {
        self.compliance = table;
        self
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Builds the context of one cell. Identifier graphics are taken from,
    /// and added to, the page's `qr_cache`.
    pub fn build(&self, record: &Record, qr_cache: &mut QrCache) -> LabelContext {
        let spec = self.kind.spec();
        let category = classify(record, &self.primary);
        let mut ctx = LabelContext::blank(spec.fields);
        ctx.set_category(category);

        for &field in spec.fields {
            let value = match field {
                LabelField::Doh => self
                    .compliance
                    .resolve(&record.text(fields::DOH), category, spec.rules.compliance_width)
                    .map(ContextValue::Graphic),
                LabelField::Qr => qr_cache
                    .get_or_generate(&record.text(fields::PRODUCT_NAME), spec.rules.qr_size)
                    .map(ContextValue::Graphic),
                LabelField::Lineage => {
                    let lineage = match category {
                        Category::Primary => resolve_lineage(record, self.lineage.as_ref()),
                        Category::Secondary => String::new(),
                    };
                    let line = lineage_line(
                        spec,
                        category,
                        &lineage,
                        &clean_text(&record.text(fields::PRODUCT_BRAND)),
                        &clean_text(&record.text(fields::VENDOR)),
                    );
                    Some(ContextValue::Text(line))
                }
                text_field => self.display_text(text_field, record).map(|text| {
                    let marker = text_field.marker();
                    ContextValue::Text(match marker {
                        Some(marker) => wrap(marker, &text),
                        None => text,
                    })
                }),
            };
            if let Some(value) = value {
                ctx.set(field, value);
            }
        }
        ctx
    }

    /// Normalized display text of a plain text field, `None` when empty.
    fn display_text(&self, field: LabelField, record: &Record) -> Option<String> {
        let rules = &self.kind.spec().rules;
        let text = match field {
            LabelField::ProductBrand => clean_text(&record.text(fields::PRODUCT_BRAND)),
            LabelField::DescAndWeight => desc_and_weight(record, rules.desc_weight_joiner),
            LabelField::Ratio => format_ratio(record),
            LabelField::Price => format_price(record),
            LabelField::ProductStrain => clean_text(&record.text(fields::PRODUCT_STRAIN)),
            LabelField::ProductType => clean_text(&record.text(fields::PRODUCT_TYPE)),
            LabelField::Lineage | LabelField::Doh | LabelField::Qr => String::new(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgrid_markers::{MarkerField, is_wrapped};
    use labelgrid_traits::InMemoryLineageStore;
    use serde_json::json;

    fn flower() -> Record {
        Record::from_value(json!({
            "ProductName": "Blue Dream Flower 3.5g",
            "ProductBrand": "Acme",
            "Vendor": "Green Valley",
            "ProductType": "Flower",
            "ProductStrain": "Blue Dream",
            "Lineage": "hybrid",
            "Description": "Blue Dream -",
            "Weight": "3.50",
            "Units": "g",
            "THC": "22",
            "CBD": "0.5",
            "Price": 35,
            "DOH": "Yes"
        }))
    }

    #[test]
    fn test_every_recognized_field_is_present() {
        let mut cache = QrCache::new();
        let odd_records = [
            Record::new(),
            Record::from_value(json!({"Price": null, "Weight": true, "Ratio": 7})),
            Record::from_value(json!({"ProductName": "", "Description": " - | "})),
            flower(),
        ];
        for kind in TemplateKind::ALL {
            let builder = LabelContextBuilder::new(kind);
            for record in &odd_records {
                let ctx = builder.build(record, &mut cache);
                for field in kind.spec().fields {
                    assert!(ctx.contains(*field), "{kind} missing {field}");
                }
                assert_eq!(ctx.len(), kind.spec().fields.len());
            }
        }
    }

    #[test]
    fn test_text_values_are_wrapped() {
        let builder = LabelContextBuilder::new(TemplateKind::Horizontal);
        let ctx = builder.build(&flower(), &mut QrCache::new());

        assert!(is_wrapped(MarkerField::Price, ctx.text(LabelField::Price)));
        assert_eq!(ctx.text(LabelField::Price), "PRICE_START$35PRICE_END");
        assert_eq!(ctx.text(LabelField::DescAndWeight), "DESC_STARTBlue Dream\n3.5gDESC_END");
        assert_eq!(ctx.text(LabelField::Ratio), "RATIO_START22% / 0.5%RATIO_END");
        assert_eq!(ctx.category(), Category::Primary);
        assert!(matches!(ctx.get(LabelField::Doh), Some(ContextValue::Graphic(_))));
        assert!(matches!(ctx.get(LabelField::Qr), Some(ContextValue::Graphic(_))));
    }

    #[test]
    fn test_missing_values_are_empty_not_wrapped() {
        let builder = LabelContextBuilder::new(TemplateKind::Mini);
        let ctx = builder.build(&Record::new(), &mut QrCache::new());
        assert!(LabelField::ALL.iter().all(|f| ctx.get(*f).is_some_and(ContextValue::is_empty)));
    }

    #[test]
    fn test_lineage_comes_from_the_store() {
        let store = InMemoryLineageStore::new().with("Blue Dream", "Hybrid/Sativa");
        let builder = LabelContextBuilder::new(TemplateKind::Horizontal).with_lineage_lookup(Arc::new(store));
        let ctx = builder.build(&flower(), &mut QrCache::new());
        assert_eq!(
            ctx.text(LabelField::Lineage),
            "LINEAGE_STARTHYBRID/SATIVALINEAGE_END\tVENDOR_STARTGreen ValleyVENDOR_END"
        );
    }

    #[test]
    fn test_secondary_products_show_brand() {
        let edible = flower().with("ProductType", "Edible (Solid)");
        let builder = LabelContextBuilder::new(TemplateKind::Double);
        let ctx = builder.build(&edible, &mut QrCache::new());
        assert_eq!(ctx.category(), Category::Secondary);
        assert_eq!(ctx.text(LabelField::Lineage), "LINEAGE_STARTAcmeLINEAGE_END");
    }

    #[test]
    fn test_mini_joins_weight_without_a_break() {
        let builder = LabelContextBuilder::new(TemplateKind::Mini);
        let ctx = builder.build(&flower(), &mut QrCache::new());
        assert_eq!(
            ctx.text(LabelField::DescAndWeight),
            "DESC_STARTBlue Dream\u{00A0}-\u{00A0}3.5gDESC_END"
        );
    }

    #[test]
    fn test_qr_graphics_are_shared_within_a_page() {
        let builder = LabelContextBuilder::new(TemplateKind::Inventory);
        let mut cache = QrCache::new();
        builder.build(&flower(), &mut cache);
        builder.build(&flower(), &mut cache);
        assert_eq!(cache.generated(), 1);
    }
}
