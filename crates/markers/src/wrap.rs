use crate::field::MarkerField;

/// Wraps `text` in the field's marker pair.
///
/// Any marker tokens of the same field already inside `text` are removed
/// first, so wrapping is idempotent and spans of one field never nest.
pub fn wrap(field: MarkerField, text: &str) -> String {
    let inner = unwrap(field, text);
    let mut out = String::with_capacity(inner.len() + field.start_token().len() + field.end_token().len());
    out.push_str(field.start_token());
    out.push_str(&inner);
    out.push_str(field.end_token());
    out
}

/// Removes every marker token of `field` from `text`.
pub fn unwrap(field: MarkerField, text: &str) -> String {
    let mut current = text.to_string();
    // Removing one token can join the halves of another.
    loop {
        let next = current
            .replace(field.start_token(), "")
            .replace(field.end_token(), "");
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// True when `text` is exactly one balanced span of `field`.
pub fn is_wrapped(field: MarkerField, text: &str) -> bool {
    text.strip_prefix(field.start_token())
        .and_then(|rest| rest.strip_suffix(field.end_token()))
        .is_some_and(|inner| !inner.contains(field.start_token()) && !inner.contains(field.end_token()))
}
