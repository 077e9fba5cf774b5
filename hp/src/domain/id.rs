//! Domain ID generation
//!
//! All IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019430-trip-detroit-mi-to-boston-ma`

/// Generate a domain ID from record kind and a human-readable label
pub fn generate_id(kind: &str, label: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(label);
    format!("{}-{}-{}", hex_prefix, kind, slug)
}

/// Slugify a label for use in IDs
fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        // Strip apostrophes entirely, replace other non-alphanumeric with hyphens
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Check whether a stored ID matches a user-supplied reference.
///
/// Accepts exact IDs, unique hex prefixes, and substrings of the
/// kind-and-slug portion, so `hp show boston` finds
/// `019430-trip-detroit-mi-to-boston-ma`.
pub fn id_matches(id: &str, reference: &str) -> bool {
    if id == reference || id.starts_with(reference) {
        return true;
    }
    if let Some(slug_start) = id.find('-') {
        let slug_part = &id[slug_start + 1..];
        if slug_part.contains(reference) {
            return true;
        }
    }
    false
}
