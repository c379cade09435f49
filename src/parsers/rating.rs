use once_cell::sync::Lazy;
use regex::Regex;

static RATING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid rating regex")
});

// Scale-first form used on amazon.co.jp: "5つ星のうち4.5".
static SCALE_FIRST_RATING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"のうち\s*(\d+(?:[.,]\d+)?)")
        .expect("Invalid scale-first rating regex")
});

static COUNT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}(?:[,.\u{a0}\u{202f}]\d{3})+|\d+")
        .expect("Invalid review count regex")
});

/// Rating from a star widget's alt text, e.g. "4.7 out of 5 stars" -> "4.7".
/// Continental pages use a decimal comma ("4,7 von 5 Sternen"), which is kept.
/// Japanese pages put the scale first ("5つ星のうち4.5"), so the number after
/// the scale is taken there.
pub fn parse_rating_text(text: &str) -> Option<String> {
    SCALE_FIRST_RATING_REGEX
        .captures(text)
        .or_else(|| RATING_REGEX.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Rating from counted star icons: full icons count one, half icons count
/// one half. Returns `None` when no icons were found at all.
pub fn rating_from_star_icons(full: usize, half: usize) -> Option<String> {
    if full == 0 && half == 0 {
        return None;
    }
    let value = full as f64 + half as f64 * 0.5;
    Some(format!("{:.1}", value.min(5.0)))
}

/// "125,432 ratings" -> "125,432". Text without digits is returned trimmed.
pub fn parse_review_count(text: &str) -> Option<String> {
    let text = super::clean_text(text);
    if text.is_empty() {
        return None;
    }
    match COUNT_REGEX.find(&text) {
        Some(m) => Some(m.as_str().to_string()),
        None => Some(text),
    }
}
