//! Duration markers and note-level duration rules.

/// A dot extends a duration by half its value.
pub const DOT_MULTIPLIER: f64 = 1.5;

/// Parse the decimal digits at the start of `s`.
///
/// Trailing non-digit characters are ignored, so `"8x"` gives `8`.
/// Returns `None` when `s` does not start with a digit or the value
/// overflows `u32`.
pub fn leading_integer(s: &str) -> Option<u32> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse a duration marker such as `:4` or `:8.` into a fraction of a whole note.
///
/// Returns `None` for anything that is not a marker, and for markers whose
/// denominator is missing or zero.
///
/// # Example
/// ```
/// # use alphabar::rhythm::parse_duration;
/// assert_eq!(parse_duration(":4"), Some(0.25));
/// assert_eq!(parse_duration(":8."), Some(0.1875));
/// assert_eq!(parse_duration(":0"), None);
/// assert_eq!(parse_duration("abc"), None);
/// ```
pub fn parse_duration(token: &str) -> Option<f64> {
    let body = token.strip_prefix(':')?;
    let dotted = body.contains('.');
    let digits = body.replacen('.', "", 1);

    let denominator = leading_integer(&digits)?;
    if denominator == 0 {
        return None;
    }

    let mut duration = 1.0 / denominator as f64;
    if dotted {
        duration *= DOT_MULTIPLIER;
    }
    Some(duration)
}

/// True for a `fret.string` coordinate like `3.6`: digits, one dot, digits, nothing else.
pub fn is_guitar_coordinate(token: &str) -> bool {
    match token.split_once('.') {
        Some((fret, string)) => {
            !fret.is_empty()
                && !string.is_empty()
                && fret.bytes().all(|b| b.is_ascii_digit())
                && string.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Whether a note or rest token carries a duration dot.
///
/// Guitar coordinates and comma-separated tokens contain dots that are
/// not duration dots.
pub fn is_dotted_note(token: &str) -> bool {
    token.contains('.') && !token.contains(',') && !is_guitar_coordinate(token)
}
