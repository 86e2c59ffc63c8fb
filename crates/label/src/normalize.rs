//! Display-value normalization.
//!
//! Every function here is total: malformed or missing input yields a
//! best-effort string, possibly empty, never an error.

use crate::fields;
use labelgrid_types::Record;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RATIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*:\s*(\d+(?:\.\d+)?)(?:\s*:\s*(\d+(?:\.\d+)?))?")
        .expect("BUG: invalid RATIO_RE regex literal")
});

static MASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s*mg\b").expect("BUG: invalid MASS_RE regex literal"));

static MASS_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*mg\b(?:\s+[A-Za-z]+)?").expect("BUG: invalid MASS_ITEM_RE regex literal")
});

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[/|,;]\s*").expect("BUG: invalid SEPARATOR_RE regex literal"));

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("BUG: invalid PERCENT_RE regex literal"));

static LABELED_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(THC|CBD)\b\s*:?\s*(\d+(?:\.\d+)?)\s*%")
        .expect("BUG: invalid LABELED_PERCENT_RE regex literal")
});

static PERCENT_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:thc|cbd|total)\b|[\s/|,;:]").expect("BUG: invalid PERCENT_NOISE_RE regex literal")
});

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '\u{2013}' | '\u{2014}' | '|' | ',' | ';' | '/')
}

/// Trims whitespace and dangling separators (`-`, `|`, `,`, `;`, `/`) from both ends.
pub fn strip_separators(text: &str) -> &str {
    text.trim_matches(is_separator)
}

/// Collapses runs of spaces within each line and trims the result.
/// Line breaks are kept.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a number with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').trim().parse().ok()
}

/// `25` → `$25`, `25.5` → `$25.50`. Non-numeric prices are kept as written.
pub fn format_price(record: &Record) -> String {
    match record.number(fields::PRICE) {
        Some(value) if value.fract() == 0.0 => format!("${}", value as i64),
        Some(value) => format!("${:.2}", value),
        None => clean_text(&record.text(fields::PRICE)),
    }
}

/// Weight with its units: `1.0` + `g` → `1g`, `3.50` + `g` → `3.5g`.
pub fn format_weight(record: &Record) -> String {
    let weight = record.text(fields::WEIGHT);
    let units = record.text(fields::UNITS);
    match weight.parse::<f64>() {
        Ok(value) => format!("{}{}", format_number(value), units),
        Err(_) => weight,
    }
}

/// Description and weight, joined by `joiner`. Separator artifacts at the
/// seams are dropped, and a weight the description already ends with is
/// not repeated.
pub fn desc_and_weight(record: &Record, joiner: &str) -> String {
    let description = clean_text(&record.text(fields::DESCRIPTION));
    let description = strip_separators(&description);
    let weight = format_weight(record);
    let weight = strip_separators(&weight);

    if weight.is_empty() {
        return description.to_string();
    }
    if description.is_empty() {
        return weight.to_string();
    }
    if description.to_lowercase().ends_with(&weight.to_lowercase()) {
        return description.to_string();
    }
    format!("{}{}{}", description, joiner, weight)
}

/// The cannabinoid line: the explicit ratio if present, otherwise built
/// from the separate THC and CBD values.
pub fn format_ratio(record: &Record) -> String {
    let explicit = clean_text(&record.text(fields::RATIO));
    if explicit.is_empty() {
        synthesize_ratio(record)
    } else {
        format_ratio_text(&explicit)
    }
}

/// Formats an explicit ratio value.
///
/// - mass amounts (`100mg THC / 5mg CBD`) go one per line
/// - percentage-only values become `THC: X%` / `CBD: Y%` lines
/// - `n:n[:n]` ratios lose their inner spacing
pub fn format_ratio_text(text: &str) -> String {
    if MASS_RE.is_match(text) {
        return mass_lines(text);
    }
    if let Some(dual) = percent_lines(text) {
        return dual;
    }
    RATIO_RE
        .replace_all(text, |caps: &Captures| {
            (1..=3)
                .filter_map(|i| caps.get(i).map(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join(":")
        })
        .into_owned()
}

fn mass_lines(text: &str) -> String {
    let mut items: Vec<&str> = SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.len() < 2 {
        items = MASS_ITEM_RE.find_iter(text).map(|m| m.as_str()).collect();
    }
    if items.len() < 2 {
        return text.to_string();
    }
    items.join("\n")
}

fn percent_lines(text: &str) -> Option<String> {
    let without_values = PERCENT_RE.replace_all(text, "");
    if !PERCENT_NOISE_RE.replace_all(&without_values, "").is_empty() {
        return None;
    }

    let mut thc = None;
    let mut cbd = None;
    for caps in LABELED_PERCENT_RE.captures_iter(text) {
        let value = parse_amount(&caps[2]);
        if caps[1].eq_ignore_ascii_case("thc") {
            thc = thc.or(value);
        } else {
            cbd = cbd.or(value);
        }
    }
    if thc.is_none() && cbd.is_none() {
        let mut values = PERCENT_RE.captures_iter(text).filter_map(|c| parse_amount(&c[1]));
        thc = values.next();
        cbd = values.next();
    }
    dual_label(thc, cbd)
}

fn dual_label(thc: Option<f64>, cbd: Option<f64>) -> Option<String> {
    let lines: Vec<String> = [("THC", thc), ("CBD", cbd)]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| format!("{}: {}%", label, format_number(v))))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn synthesize_ratio(record: &Record) -> String {
    let thc = parse_amount(&record.text(fields::THC));
    let cbd = parse_amount(&record.text(fields::CBD));
    match (thc, cbd) {
        (Some(thc), Some(cbd)) => format!("{}% / {}%", format_number(thc), format_number(cbd)),
        (thc, cbd) => dual_label(thc, cbd).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .fold(Record::new(), |r, (k, v)| r.with(*k, *v))
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price(&Record::new().with("Price", 25)), "$25");
        assert_eq!(format_price(&Record::new().with("Price", 25.5)), "$25.50");
        assert_eq!(format_price(&record(&[("Price", "$40")])), "$40");
        assert_eq!(format_price(&record(&[("Price", "Market")])), "Market");
        assert_eq!(format_price(&Record::new()), "");
    }

    #[test]
    fn test_weight_drops_trailing_zeros() {
        assert_eq!(format_weight(&record(&[("Weight", "1.0"), ("Units", "g")])), "1g");
        assert_eq!(format_weight(&record(&[("Weight", "3.50"), ("Units", "g")])), "3.5g");
        assert_eq!(format_weight(&Record::new().with("Weight", 28).with("Units", "g")), "28g");
        assert_eq!(format_weight(&record(&[("Weight", "1/8 oz")])), "1/8 oz");
        assert_eq!(format_weight(&record(&[("Units", "g")])), "");
    }

    #[test]
    fn test_desc_and_weight_strips_seams() {
        let r = record(&[("Description", "Blue Dream Pre-Roll - "), ("Weight", "1.0"), ("Units", "g")]);
        assert_eq!(desc_and_weight(&r, "\n"), "Blue Dream Pre-Roll\n1g");
        assert_eq!(
            desc_and_weight(&r, "\u{00A0}-\u{00A0}"),
            "Blue Dream Pre-Roll\u{00A0}-\u{00A0}1g"
        );

        let only_weight = record(&[("Weight", "2"), ("Units", "g")]);
        assert_eq!(desc_and_weight(&only_weight, "\n"), "2g");

        let repeated = record(&[("Description", "Gummies 100mg"), ("Weight", "100"), ("Units", "mg")]);
        assert_eq!(desc_and_weight(&repeated, "\n"), "Gummies 100mg");
        assert_eq!(desc_and_weight(&Record::new(), "\n"), "");
    }

    #[test]
    fn test_ratio_spacing_is_normalized() {
        assert_eq!(format_ratio_text("1 : 1"), "1:1");
        assert_eq!(format_ratio_text("THC:CBD 20 :1: 2"), "THC:CBD 20:1:2");
    }

    #[test]
    fn test_mass_ratios_go_multi_line() {
        assert_eq!(format_ratio_text("100mg THC / 5mg CBD"), "100mg THC\n5mg CBD");
        assert_eq!(format_ratio_text("100mg THC 5mg CBD"), "100mg THC\n5mg CBD");
        assert_eq!(format_ratio_text("10mg THC"), "10mg THC");
    }

    #[test]
    fn test_percentages_get_labels() {
        assert_eq!(format_ratio_text("22.50% / 1%"), "THC: 22.5%\nCBD: 1%");
        assert_eq!(format_ratio_text("CBD 2% THC 18%"), "THC: 18%\nCBD: 2%");
        assert_eq!(format_ratio_text("Total THC: 24%"), "THC: 24%");
        assert_eq!(format_ratio_text("Sativa 20%"), "Sativa 20%");
    }

    #[test]
    fn test_ratio_prefers_explicit_then_synthesizes() {
        let explicit = record(&[("Ratio", "1:1"), ("THC", "20"), ("CBD", "1")]);
        assert_eq!(format_ratio(&explicit), "1:1");

        let synthesized = record(&[("THC", "20.0"), ("CBD", "1.5%")]);
        assert_eq!(format_ratio(&synthesized), "20% / 1.5%");

        assert_eq!(format_ratio(&record(&[("THC", "18")])), "THC: 18%");
        assert_eq!(format_ratio(&Record::new()), "");
    }

    #[test]
    fn test_clean_text_and_separators() {
        assert_eq!(clean_text("  a   b \n\n  c  "), "a b\nc");
        assert_eq!(strip_separators(" | Indica - "), "Indica");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.126), "0.13");
    }
}
