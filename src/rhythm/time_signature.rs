use std::fmt;
use std::str::FromStr;

/// The directive that introduces a time signature, as in `\ts 3 4`.
pub const TIME_SIGNATURE_KEYWORD: &str = "\\ts";

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Measure capacity as a fraction of a whole note.
    ///
    /// `None` when either part is zero; such a signature cannot hold notes.
    pub fn capacity(&self) -> Option<f64> {
        if self.numerator == 0 || self.denominator == 0 {
            return None;
        }
        Some(self.numerator as f64 * (1.0 / self.denominator as f64))
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Parses the `N/D` form used in configuration files.
impl FromStr for TimeSignature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numerator, denominator) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("Invalid time signature: {}", s))?;

        let numerator = numerator
            .trim()
            .parse()
            .map_err(|_| format!("Invalid time signature numerator: {}", s))?;
        let denominator = denominator
            .trim()
            .parse()
            .map_err(|_| format!("Invalid time signature denominator: {}", s))?;

        Ok(Self::new(numerator, denominator))
    }
}

/// Find the first `\ts <numerator> <denominator>` directive anywhere in `line`.
///
/// The keyword must be followed by whitespace, digits, whitespace, digits.
/// Anything may follow the denominator's digits.
///
/// # Example
/// ```
/// # use alphabar::rhythm::{find_time_signature, TimeSignature};
/// assert_eq!(find_time_signature("\\ts 3 4"), Some(TimeSignature::new(3, 4)));
/// assert_eq!(find_time_signature("\\title \"Song\""), None);
/// ```
pub fn find_time_signature(line: &str) -> Option<TimeSignature> {
    line.match_indices(TIME_SIGNATURE_KEYWORD)
        .find_map(|(start, keyword)| parse_arguments(&line[start + keyword.len()..]))
}

/// Match `\s+(\d+)\s+(\d+)` at the start of `rest`.
fn parse_arguments(rest: &str) -> Option<TimeSignature> {
    let rest = skip_whitespace(rest)?;
    let (numerator, rest) = take_digits(rest)?;
    let rest = skip_whitespace(rest)?;
    let (denominator, _) = take_digits(rest)?;
    Some(TimeSignature::new(numerator, denominator))
}

/// Strip at least one leading whitespace character.
fn skip_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    (trimmed.len() < s.len()).then_some(trimmed)
}

/// Split at least one leading ASCII digit off `s`.
fn take_digits(s: &str) -> Option<(u32, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}
