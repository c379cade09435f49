use once_cell::sync::Lazy;
use regex::Regex;

// An amount with its currency marker, either leading (`$49.99`, `£1,299.00`,
// `￥2,980`) or trailing as on the continental stores (`49,99 €`).
static CURRENCY_AMOUNT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$£€¥￥₹]\s?\d[\d,.]*|\d[\d,.]*\s?€")
        .expect("Invalid currency amount regex")
});

/// Amazon renders the price twice inside `.a-price` (visible and offscreen),
/// so the raw text reads `$49.99$49.99`. Keep the first amount when the text
/// repeats itself; anything else is returned as found.
pub fn clean_price(price_text: &str) -> String {
    let text = super::clean_text(price_text);

    let amounts: Vec<&str> = CURRENCY_AMOUNT_REGEX
        .find_iter(&text)
        .map(|m| m.as_str())
        .collect();

    match amounts.as_slice() {
        [first, rest @ ..] if !rest.is_empty() => first.to_string(),
        _ => text,
    }
}
