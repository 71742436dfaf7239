use std::sync::LazyLock;

use regex::Regex;

static ABBREVIATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?|\.\d+)([kmb]?)$").expect("valid regex"));

/// Parses a count as platforms display it: `"1,234"`, `"12.5K"`, `"3M"`,
/// `"1.2 b"`. Whitespace and thousands separators are ignored; suffixes are
/// case-insensitive. Anything else is `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_abbreviated_count(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let caps = ABBREVIATED_RE.captures(&cleaned)?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier = match caps
        .get(2)
        .map(|m| m.as_str().to_ascii_lowercase())
        .as_deref()
    {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        Some("b") => 1_000_000_000.0,
        _ => 1.0,
    };
    let value = (number * multiplier).round();
    if value.is_finite() && value < 9.0e18 {
        Some(value as i64)
    } else {
        None
    }
}
