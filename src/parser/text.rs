use once_cell::sync::Lazy;
use regex::Regex;

/// Month names and abbreviations as they appear in report dates.
pub(crate) const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sept?(?:ember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

/// `(updated May 5)` / `(Updated Sept. 12)`.
pub(crate) static UPDATED_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(\s*updated\s+(\w+\.?\s+\d+)\s*\)").expect("annotation pattern")
});

static MORE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bMore\s*(?:»|>>|&raquo;)").expect("more marker pattern"));

/// Strips the update annotation and "More »" marker, collapses whitespace.
/// Blank results become `None`.
pub fn clean_field(raw: &str) -> Option<String> {
    let without_note = UPDATED_ANNOTATION.replace_all(raw, " ");
    let without_more = MORE_MARKER.replace_all(&without_note, " ");
    let collapsed = without_more.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Whitespace-collapsed, trimmed; blank becomes `None`.
pub fn squash(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest, so "day-to-day" becomes "Day-To-Day".
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
