//! Brazilian-locale amount normalization.
//!
//! Statement amounts arrive as `30.000,00`, `220,59`, `-1,00` or bare digit
//! runs. Every separator is dropped and the last two digits are taken as
//! cents, giving `30000,00`: comma decimal separator, no thousands separator.

/// Normalize a raw statement amount to `<int>,<cents>`.
pub fn normalize_number(raw: &str) -> String {
    if raw.is_empty() {
        return "0,00".to_string();
    }

    let stripped: String = raw.trim().chars().filter(|c| *c != '.' && *c != ',').collect();
    let (negative, digits) = match stripped.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, stripped.as_str()),
    };

    let mut padded = String::new();
    for _ in digits.chars().count()..3 {
        padded.push('0');
    }
    padded.push_str(digits);

    // at least 3 chars, so the split leaves a non-empty integer part
    let split = padded
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let formatted = format!("{},{}", &padded[..split], &padded[split..]);

    if negative {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// True when a normalized amount carries no non-zero digit (`0,00`, `-0,00`).
pub fn is_zero_amount(normalized: &str) -> bool {
    normalized
        .chars()
        .filter(|c| c.is_ascii_digit())
        .all(|c| c == '0')
}
