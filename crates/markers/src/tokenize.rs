use crate::field::MarkerField;
use regex::Regex;
use std::sync::LazyLock;

static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("({})_START", MarkerField::tag_alternation()))
        .expect("BUG: invalid START_RE regex literal")
});

/// One piece of a paragraph's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any marker span, kept as is.
    Literal(&'a str),
    /// The interior of one balanced marker span.
    Span { field: MarkerField, content: &'a str },
}

/// Splits text into literal and marker-span segments in one left-to-right scan.
///
/// A start token without a matching end token is left in the literal text;
/// the residue cleanup removes it later.
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_from = 0;
    let mut cursor = 0;

    while let Some(caps) = START_RE.captures_at(text, cursor) {
        let (Some(token), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(field) = MarkerField::from_tag(tag.as_str()) else {
            cursor = token.end();
            continue;
        };
        let content_from = token.end();
        let Some(len) = text[content_from..].find(field.end_token()) else {
            log::debug!("Unbalanced {} span at byte {}", field, token.start());
            cursor = token.end();
            continue;
        };

        if token.start() > literal_from {
            segments.push(Segment::Literal(&text[literal_from..token.start()]));
        }
        segments.push(Segment::Span {
            field,
            content: &text[content_from..content_from + len],
        });
        cursor = content_from + len + field.end_token().len();
        literal_from = cursor;
    }

    if literal_from < text.len() {
        segments.push(Segment::Literal(&text[literal_from..]));
    }
    segments
}

/// True when the text holds at least one balanced marker span.
pub fn has_spans(text: &str) -> bool {
    tokenize(text)
        .iter()
        .any(|s| matches!(s, Segment::Span { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::wrap;

    #[test]
    fn test_several_fields_in_one_paragraph() {
        let text = format!(
            "{}\t{} | {}",
            wrap(MarkerField::Lineage, "HYBRID"),
            wrap(MarkerField::Vendor, "Acme Farms"),
            wrap(MarkerField::Price, "$25")
        );
        assert_eq!(
            tokenize(&text),
            vec![
                Segment::Span { field: MarkerField::Lineage, content: "HYBRID" },
                Segment::Literal("\t"),
                Segment::Span { field: MarkerField::Vendor, content: "Acme Farms" },
                Segment::Literal(" | "),
                Segment::Span { field: MarkerField::Price, content: "$25" },
            ]
        );
    }

    #[test]
    fn test_plain_text_is_one_literal() {
        assert_eq!(tokenize("no markers"), vec![Segment::Literal("no markers")]);
        assert!(tokenize("").is_empty());
        assert!(!has_spans("no markers"));
    }

    #[test]
    fn test_unbalanced_start_stays_literal() {
        let text = "LINEAGE_STARTINDICA and PRICE_START$5PRICE_END";
        let segments = tokenize(text);
        assert_eq!(segments[0], Segment::Literal("LINEAGE_STARTINDICA and "));
        assert_eq!(segments[1], Segment::Span { field: MarkerField::Price, content: "$5" });
    }

    #[test]
    fn test_empty_span_is_kept() {
        let text = wrap(MarkerField::Ratio, "");
        assert_eq!(tokenize(&text), vec![Segment::Span { field: MarkerField::Ratio, content: "" }]);
        assert!(has_spans(&text));
    }

    #[test]
    fn test_similar_tags_do_not_collide() {
        let text = format!(
            "{}{}",
            wrap(MarkerField::ProductStrain, "Blue Dream"),
            wrap(MarkerField::ProductType, "flower")
        );
        let fields: Vec<_> = tokenize(&text)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Span { field, .. } => Some(field),
                Segment::Literal(_) => None,
            })
            .collect();
        assert_eq!(fields, vec![MarkerField::ProductStrain, MarkerField::ProductType]);
    }
}
