//! Like counter text parsing
//!
//! Counter text is read the way a browser's `parseInt(text.trim()) || 0`
//! reads it: optional sign, optional `0x` prefix, then the longest run of
//! digits; anything after that run is ignored. The byte order mark is
//! trimmed like whitespace. Results are clamped to the
//! non-negative range and saturate at `u32::MAX`.

/// Like count of a counter element's text content
#[must_use]
pub fn parse_like_count(text: &str) -> u32 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: u32 = 0;
    let mut seen_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen_digit = true;
        value = value.saturating_mul(radix).saturating_add(digit);
    }

    if negative || !seen_digit { 0 } else { value }
}
