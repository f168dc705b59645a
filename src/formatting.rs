use crate::normalization::normalize;
use crate::CUIT_LENGTH;

/// Display form of a CUIT: `DD-DDDDDDDD-D`.
///
/// Only the length of the normalized value is checked. When it is not 11
/// characters long, the input is returned untouched rather than partially
/// formatted.
pub fn format(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let canonical: Vec<char> = normalize(raw).chars().collect();
    if canonical.len() != CUIT_LENGTH {
        return raw.to_string();
    }

    let mut formatted = String::with_capacity(CUIT_LENGTH + 2);
    formatted.extend(&canonical[..2]);
    formatted.push('-');
    formatted.extend(&canonical[2..10]);
    formatted.push('-');
    formatted.extend(&canonical[10..]);
    formatted
}

/// Same as [format], with an absent value formatting to the empty string.
pub fn format_opt(raw: Option<&str>) -> String {
    raw.map(format).unwrap_or_default()
}
