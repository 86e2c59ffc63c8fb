/// Asserts the number of page containers in a composed document.
#[macro_export]
macro_rules! assert_page_count {
    ($doc:expr, $expected:expr) => {
        let actual = $crate::common::pages(&$doc).len();
        assert_eq!(
            actual, $expected,
            "Expected {} page(s), but document has {}",
            $expected, actual
        );
    };
}

/// Asserts that no marker token or fragment survived anywhere in a document.
#[macro_export]
macro_rules! assert_no_marker_residue {
    ($doc:expr) => {
        let text = $doc.text_content($doc.root());
        assert!(
            !labelgrid_core::markers::has_residue(&text),
            "Marker residue leaked into the document:\n{}",
            text
        );
    };
}

/// Asserts that `needle` is in exactly one cell of the document.
#[macro_export]
macro_rules! assert_in_exactly_one_cell {
    ($doc:expr, $needle:expr) => {
        let hits = $crate::common::all_cell_texts(&$doc)
            .iter()
            .filter(|t| t.contains($needle))
            .count();
        assert_eq!(hits, 1, "'{}' found in {} cell(s)", $needle, hits);
    };
}
