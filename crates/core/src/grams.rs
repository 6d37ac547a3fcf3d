//! Validation for the gram quantity text field

/// Parse an edit to the grams field.
///
/// Accepts the empty string or 1–3 ASCII digits with a value of at least 1.
/// Returns `None` when the edit must be rejected. An empty field maps to 0,
/// which is what subsequent lookups are sent.
pub fn parse_grams_input(text: &str) -> Option<u32> {
    if text.is_empty() {
        return Some(0);
    }
    if text.len() > 3 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: u32 = text.parse().ok()?;
    if value >= 1 {
        Some(value)
    } else {
        None
    }
}
