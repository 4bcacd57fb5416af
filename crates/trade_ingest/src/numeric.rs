use crate::error::NormalizeError;

/// Parses an accounting-formatted price or P/L string into a signed `f64`.
///
/// Strips `$` and thousands separators, trims whitespace, and treats a
/// parenthesized value as negative (`($12.50)` is `-12.50`). Already
/// clean strings pass through unchanged, so cleaning is idempotent.
pub fn clean_number(raw: &str) -> Result<f64, NormalizeError> {
    let stripped = raw.replace('$', "").replace(',', "");
    let trimmed = stripped.trim();

    let normalized = if trimmed.len() > 1 && trimmed.starts_with('(') && trimmed.ends_with(')') {
        format!("-{}", &trimmed[1..trimmed.len() - 1])
    } else {
        trimmed.to_string()
    };

    normalized
        .parse::<f64>()
        .map_err(|_| NormalizeError::BadNumber(raw.to_string()))
}
