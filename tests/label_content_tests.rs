mod common;

use common::fixtures::*;
use common::{TestResult, builder_for, cell_texts, pages, pipeline_for};
use labelgrid::{InMemoryLineageStore, LineageLookup, NodeKind, TemplateKind};
use labelgrid_core::style_types::TextAlign;
use labelgrid_core::{Color, Document, LookupError, NodeId, StrainInfo};
use std::sync::Arc;

#[derive(Debug)]
struct UnreachableStore;

impl LineageLookup for UnreachableStore {
    fn lookup(&self, _strain: &str) -> Result<Option<StrainInfo>, LookupError> {
        Err(LookupError::Unavailable("connection refused".into()))
    }

    fn name(&self) -> &'static str {
        "unreachable"
    }
}

fn first_cell(doc: &Document) -> NodeId {
    doc.find_first(pages(doc)[0], NodeKind::is_cell).expect("page has cells")
}

/// The paragraph of the first cell whose text contains `needle`.
fn paragraph_with(doc: &Document, needle: &str) -> NodeId {
    doc.find_all(first_cell(doc), NodeKind::is_paragraph)
        .into_iter()
        .find(|p| doc.text_content(*p).contains(needle))
        .unwrap_or_else(|| panic!("no paragraph contains {needle:?}"))
}

fn alignment(doc: &Document, paragraph: NodeId) -> Option<TextAlign> {
    match doc.kind(paragraph) {
        Some(NodeKind::Paragraph(style)) => style.align,
        _ => None,
    }
}

#[test]
fn test_failed_lookup_falls_back_to_record_lineage() -> TestResult {
    let pipeline = builder_for(TemplateKind::Horizontal)
        .with_lineage_lookup(Arc::new(UnreachableStore))
        .build()?;
    let output = pipeline.run(vec![flower("Blue Dream 3.5g", "Acme")])?;

    let cells = cell_texts(&output.document, pages(&output.document)[0]);
    assert!(cells[0].contains("INDICA\tGreen Valley"), "{:?}", cells[0]);
    assert_no_marker_residue!(output.document);
    assert_eq!(output.report.chunks_completed, 1);
    Ok(())
}

#[test]
fn test_lineage_store_overrides_record() -> TestResult {
    let store = InMemoryLineageStore::new().with("Blue Dream", "Sativa");
    let pipeline = builder_for(TemplateKind::Horizontal)
        .with_lineage_lookup(Arc::new(store))
        .build()?;
    let output = pipeline.run(vec![flower("Blue Dream 3.5g", "Acme")])?;
    let doc = &output.document;

    let lineage = paragraph_with(doc, "SATIVA");
    assert_eq!(alignment(doc, lineage), Some(TextAlign::Left));
    match doc.kind(lineage) {
        Some(NodeKind::Paragraph(style)) => {
            assert_eq!(style.tab_stops.len(), 1);
            assert_eq!(style.tab_stops[0].align, TextAlign::Right);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }

    let vendor_run = doc
        .find_all(lineage, |k| matches!(k, NodeKind::Run(_)))
        .into_iter()
        .find(|r| doc.text_content(*r) == "Green Valley")
        .expect("vendor run");
    match doc.kind(vendor_run) {
        Some(NodeKind::Run(style)) => {
            assert!(style.is_italic());
            assert_eq!(style.color, Some(Color::vendor_gray()));
        }
        other => panic!("expected run, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_secondary_products_show_centered_brand_without_vendor() -> TestResult {
    let output = pipeline_for(TemplateKind::Double)?.run(vec![edible("Gummies 10pk", "Wana")])?;
    let doc = &output.document;

    let cell = doc.text_content(first_cell(doc));
    assert!(!cell.contains("Kitchen Co"), "{cell:?}");
    let brand_slot = doc
        .find_all(first_cell(doc), NodeKind::is_paragraph)
        .into_iter()
        .filter(|p| doc.text_content(*p) == "Wana")
        .collect::<Vec<_>>();
    assert_eq!(brand_slot.len(), 2, "brand line and lineage slot both show the brand");
    assert!(brand_slot.iter().all(|p| alignment(doc, *p) == Some(TextAlign::Center)));
    Ok(())
}

#[test]
fn test_double_force_splits_hybrid_lineages() -> TestResult {
    let store = InMemoryLineageStore::new().with("Blue Dream", "Hybrid/Indica");
    let pipeline = builder_for(TemplateKind::Double)
        .with_lineage_lookup(Arc::new(store))
        .build()?;
    let output = pipeline.run(vec![flower("Blue Dream 1g", "Acme")])?;

    let lineage = paragraph_with(&output.document, "HYBRID/INDICA");
    assert_eq!(output.document.text_content(lineage), "HYBRID/INDICA\n\tGreen Valley");
    Ok(())
}

#[test]
fn test_weight_joins_description_per_kind() -> TestResult {
    let record = flower("Gelato", "Acme");

    let mini = pipeline_for(TemplateKind::Mini)?.run(vec![record.clone()])?;
    paragraph_with(&mini.document, "Gelato\u{00A0}-\u{00A0}3.5g");

    let double = pipeline_for(TemplateKind::Double)?.run(vec![record])?;
    let desc = paragraph_with(&double.document, "Gelato");
    assert_eq!(double.document.text_content(desc), "Gelato\n3.5g");
    Ok(())
}

#[test]
fn test_price_and_ratio_formatting() -> TestResult {
    let output = pipeline_for(TemplateKind::Horizontal)?.run(vec![
        flower("Gelato", "Acme"),
        edible("Chews", "Wana"),
    ])?;
    let cells = cell_texts(&output.document, pages(&output.document)[0]);

    assert!(cells[0].contains("$35"));
    assert!(cells[0].contains("22.4% / 0.1%"));
    assert!(cells[1].contains("$12.50"));
    assert!(cells[1].contains("100mg THC\n5mg CBD"), "{:?}", cells[1]);

    let ratio = paragraph_with(&output.document, "22.4%");
    assert_eq!(alignment(&output.document, ratio), Some(TextAlign::Right));
    Ok(())
}

#[test]
fn test_compliance_and_identifier_graphics() -> TestResult {
    let horizontal = pipeline_for(TemplateKind::Horizontal)?.run(vec![flower("Gelato", "Acme")])?;
    let doc = &horizontal.document;
    let images = doc.find_all(first_cell(doc), |k| matches!(k, NodeKind::Image(_)));
    assert_eq!(images.len(), 1);

    let inventory = pipeline_for(TemplateKind::Inventory)?.run(vec![flower("Gelato", "Acme")])?;
    let doc = &inventory.document;
    let qr = doc
        .find_first(first_cell(doc), |k| matches!(k, NodeKind::Image(_)))
        .and_then(|id| match doc.kind(id) {
            Some(NodeKind::Image(image)) => image.content_type.clone(),
            _ => None,
        });
    assert_eq!(qr.as_deref(), Some("image/svg+xml"));
    Ok(())
}

#[test]
fn test_sizes_shrink_for_long_descriptions() -> TestResult {
    let short = flower("Gelato", "Acme");
    let long = flower(&"Extremely Long Premium Indoor Craft Flower ".repeat(3), "Acme");
    let output = pipeline_for(TemplateKind::Horizontal)?.run(vec![short, long])?;
    let doc = &output.document;

    let cells = doc.find_all(pages(doc)[0], NodeKind::is_cell);
    let desc_size = |cell: NodeId, needle: &str| {
        doc.find_all(cell, |k| matches!(k, NodeKind::Run(_)))
            .into_iter()
            .find(|r| doc.text_content(*r).contains(needle))
            .and_then(|r| match doc.kind(r) {
                Some(NodeKind::Run(style)) => style.font_size,
                _ => None,
            })
    };
    let short_size = desc_size(cells[0], "Gelato").expect("short description run");
    let long_size = desc_size(cells[1], "Extremely").expect("long description run");
    assert!(long_size < short_size, "{long_size} !< {short_size}");
    Ok(())
}
