use crate::domain::errors::ScoringError;

/// Parse a human-readable magnitude string ("12.3K", "4M", "1,234") into a
/// count.
///
/// Thousands-separator commas are stripped first. A trailing `k`/`m`/`b`
/// (case-insensitive) multiplies the remaining float by 1e3/1e6/1e9 with the
/// result truncated toward zero; anything else must parse as a plain
/// integer. Counts are non-negative, so a leading sign is rejected.
pub fn normalize_magnitude(text: &str) -> Result<u64, ScoringError> {
    let invalid = || ScoringError::InvalidCount {
        input: text.to_string(),
    };

    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(invalid());
    }

    let last = cleaned
        .chars()
        .last()
        .map(|c| c.to_ascii_lowercase())
        .ok_or_else(invalid)?;

    let multiplier = match last {
        'k' => Some(1e3),
        'm' => Some(1e6),
        'b' => Some(1e9),
        _ => None,
    };

    match multiplier {
        Some(factor) => {
            let mantissa = &cleaned[..cleaned.len() - 1];
            let value: f64 = mantissa.parse().map_err(|_| invalid())?;
            if value < 0.0 || !value.is_finite() {
                return Err(invalid());
            }
            Ok((value * factor) as u64)
        }
        None => cleaned.parse::<u64>().map_err(|_| invalid()),
    }
}
