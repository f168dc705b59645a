/// Characters stripped from a raw identifier. Anything else is kept, so a value
/// containing letters or symbols stays invalid after normalization.
const SEPARATORS: &[char] = &['-', ' '];

/// Removes hyphens and spaces from a raw CUIT, e.g. `"20-30536116-0"` becomes
/// `"20305361160"`.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

/// Same as [normalize], with an absent value normalizing to the empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}
