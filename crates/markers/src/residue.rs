use crate::field::MarkerField;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Complete marker tokens of any field.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?:{})_(?:START|END)", MarkerField::tag_alternation()))
        .expect("BUG: invalid TOKEN_RE regex literal")
});

/// Truncated tokens such as `LINEAGE_STA` that end a word.
static FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "((?:{})_(?:STAR|STA|ST|S|EN|E)?)(?:[^A-Za-z0-9]|$)",
        MarkerField::tag_alternation()
    ))
    .expect("BUG: invalid FRAGMENT_RE regex literal")
});

/// Words cut short at the front: `EAGE_END`, a bare `_START`, or the `TART`
/// left over from a split `START`.
static HEAD_CUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:(?:{})?_(?:START|END)|TART)\b",
        MarkerField::tag_suffix_alternation()
    ))
    .expect("BUG: invalid HEAD_CUT_RE regex literal")
});

/// Words cut short at both ends, such as `EAGE_ST`.
static TAIL_FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b((?:{})_(?:STAR|STA|ST|S|EN|E)?)(?:[^A-Za-z0-9]|$)",
        MarkerField::tag_suffix_alternation()
    ))
    .expect("BUG: invalid TAIL_FRAGMENT_RE regex literal")
});

/// Byte ranges of marker residue in `text`, sorted and non-overlapping.
pub fn residue_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = TOKEN_RE.find_iter(text).map(|m| m.range()).collect();
    for found in HEAD_CUT_RE.find_iter(text) {
        push_disjoint(&mut ranges, found.range());
    }
    for re in [&*FRAGMENT_RE, &*TAIL_FRAGMENT_RE] {
        let mut cursor = 0;
        while let Some(caps) = re.captures_at(text, cursor) {
            let (Some(whole), Some(fragment)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            push_disjoint(&mut ranges, fragment.range());
            // The terminator may begin the next fragment.
            cursor = fragment.end().max(whole.start() + 1);
        }
    }
    ranges.sort_by_key(|r| r.start);
    ranges
}

fn push_disjoint(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if !ranges.iter().any(|r| r.start < range.end && range.start < r.end) {
        ranges.push(range);
    }
}

pub fn has_residue(text: &str) -> bool {
    !residue_ranges(text).is_empty()
}

/// Removes marker tokens and truncated fragments until none remain.
pub fn strip_residue(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let ranges = residue_ranges(&current);
        if ranges.is_empty() {
            return current;
        }
        let mut next = String::with_capacity(current.len());
        let mut from = 0;
        for range in ranges {
            next.push_str(&current[from..range.start]);
            from = range.end;
        }
        next.push_str(&current[from..]);
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_complete_tokens() {
        assert_eq!(strip_residue("LINEAGE_STARTINDICALINEAGE_END"), "INDICA");
        assert_eq!(strip_residue("$5PRICE_END and RATIO_START"), "$5 and ");
    }

    #[test]
    fn test_strips_truncated_fragments() {
        assert_eq!(strip_residue("Acme VENDOR_STA"), "Acme ");
        assert_eq!(strip_residue("DESC_ 1g"), " 1g");
        assert_eq!(strip_residue("VENDOR_E\tx"), "\tx");
    }

    #[test]
    fn test_leaves_ordinary_words_alone() {
        for text in [
            "Sativa dominant",
            "VENDOR_Selection",
            "Lineage: HYBRID",
            "PRICES",
            "Lemon Tart",
            "INDICA_ENDURANCE",
            "HALF_STARTER",
        ] {
            assert_eq!(strip_residue(text), text);
        }
    }

    #[test]
    fn test_strips_tokens_missing_their_head() {
        assert_eq!(strip_residue("HYBRID EAGE_END"), "HYBRID ");
        assert_eq!(strip_residue("Acme RICE_END"), "Acme ");
        assert_eq!(strip_residue("x _START y"), "x  y");
        assert_eq!(strip_residue("3.5g _END"), "3.5g ");
        for text in ["HYBRID EAGE_END", "Acme RICE_END", "x _START y", "3.5g _END"] {
            assert!(has_residue(text), "{text}");
        }
    }

    #[test]
    fn test_strips_remnants_cut_at_both_ends() {
        assert_eq!(strip_residue("INDICA EAGE_ST"), "INDICA ");
        assert_eq!(strip_residue("NDOR_ Acme"), " Acme");
        assert_eq!(strip_residue("$12 TART"), "$12 ");
        assert!(has_residue("$12 TART"));
        assert!(has_residue("NDOR_ Acme"));
    }

    #[test]
    fn test_head_cut_does_not_swallow_glued_content() {
        // Only the tag tail goes, never the word it is glued to.
        assert_eq!(strip_residue("INDICALINEAGE_END"), "INDICA");
        assert_eq!(strip_residue("$5PRICE_END"), "$5");
    }

    #[test]
    fn test_strip_is_idempotent_and_handles_joined_tokens() {
        let text = "x LINEAGE_STLINEAGE_ENDART y";
        let once = strip_residue(text);
        assert_eq!(once, "x  y");
        assert_eq!(strip_residue(&once), once);
        assert!(!has_residue(&once));
    }

    #[test]
    fn test_ranges_are_sorted() {
        let ranges = residue_ranges("PRICE_END a LINEAGE_S b DESC_START");
        assert_eq!(ranges.len(), 3);
        assert!(ranges.windows(2).all(|w| w[0].end <= w[1].start));
    }
}
