pub mod selectors;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::models::{ProductRecord, NOT_AVAILABLE};
use crate::parsers::{
    clean_price, non_empty, parse_rating_text, parse_review_count, rating_from_star_icons,
};
use crate::validator::NormalizedUrl;

// Star widget classes such as `a-star-4-5` or `a-star-mini-4`.
static STAR_CLASS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^a-star(?:-mini|-medium)?-(\d)(?:-(\d))?$")
        .expect("Invalid star class regex")
});

/// Build a product record from a fetched page. Never fails: every field is
/// looked up on its own and falls back to `NOT_AVAILABLE` (or an empty list).
pub fn extract(html: &str, url: &NormalizedUrl) -> ProductRecord {
    let document = Html::parse_document(html);
    extract_from_document(&document, url.as_str())
}

pub fn extract_from_document(document: &Html, url: &str) -> ProductRecord {
    let record = ProductRecord {
        url: url.to_string(),
        title: or_fallback("title", extract_title(document)),
        price: or_fallback("price", extract_price(document)),
        rating: or_fallback("rating", extract_rating(document)),
        num_ratings: or_fallback("num_ratings", extract_review_count(document)),
        image_url: or_fallback("image_url", extract_image_url(document, url)),
        breadcrumbs: extract_breadcrumbs(document),
        about_item: extract_about_item(document),
    };

    debug!(
        "Extracted {}/5 fields, {} breadcrumbs, {} bullets from {}",
        record.available_field_count(),
        record.breadcrumbs.len(),
        record.about_item.len(),
        url
    );

    record
}

fn or_fallback(field: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        debug!("Field '{}' not found, using fallback", field);
        NOT_AVAILABLE.to_string()
    })
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

fn element_text(element: &ElementRef<'_>) -> Option<String> {
    non_empty(&element.text().collect::<String>())
}

/// First non-empty text across `selectors`, tried in order.
fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|css| parse_selector(css))
        .find_map(|selector| document.select(&selector).find_map(|el| element_text(&el)))
}

fn first_element<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .filter_map(|css| parse_selector(css))
        .find_map(|selector| document.select(&selector).next())
}

fn all_texts(document: &Html, css: &str) -> Vec<String> {
    match parse_selector(css) {
        Some(selector) => document
            .select(&selector)
            .filter_map(|el| element_text(&el))
            .collect(),
        None => Vec::new(),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    first_text(document, selectors::TITLE)
}

fn extract_price(document: &Html) -> Option<String> {
    first_text(document, selectors::PRICE).map(|text| clean_price(&text))
}

/// Alt text first ("4.7 out of 5 stars"), then the widget's star class
/// (`a-star-4-5`), then counting full and half star icons.
fn extract_rating(document: &Html) -> Option<String> {
    if let Some(rating) = first_text(document, selectors::RATING_ALT)
        .as_deref()
        .and_then(parse_rating_text)
    {
        return Some(rating);
    }

    let widget = first_element(document, selectors::RATING_WIDGET)?;

    if let Some(rating) = rating_from_star_class(&widget) {
        return Some(rating);
    }

    let full = parse_selector(selectors::STAR_FULL)
        .map(|selector| widget.select(&selector).count())
        .unwrap_or(0);
    let half = parse_selector(selectors::STAR_HALF)
        .map(|selector| widget.select(&selector).count())
        .unwrap_or(0);
    rating_from_star_icons(full, half)
}

fn rating_from_star_class(widget: &ElementRef<'_>) -> Option<String> {
    let icon_selector = parse_selector("i")?;
    widget
        .select(&icon_selector)
        .flat_map(|icon| icon.value().classes())
        .find_map(|class| {
            let captures = STAR_CLASS_REGEX.captures(class)?;
            let whole = captures.get(1)?.as_str();
            let fraction = captures.get(2).map(|m| m.as_str()).unwrap_or("0");
            Some(format!("{}.{}", whole, fraction))
        })
}

fn extract_review_count(document: &Html) -> Option<String> {
    first_text(document, selectors::REVIEW_COUNT)
        .as_deref()
        .and_then(parse_review_count)
}

/// `data-old-hires` (full resolution) when present, else `src`. Inline
/// `data:` placeholders are skipped; relative paths resolve against the page.
fn extract_image_url(document: &Html, page_url: &str) -> Option<String> {
    let image = first_element(document, selectors::IMAGE)?;
    let raw = ["data-old-hires", "src"]
        .iter()
        .filter_map(|attr| image.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty() && !value.starts_with("data:"))?;

    match Url::parse(page_url).and_then(|base| base.join(raw)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

fn extract_breadcrumbs(document: &Html) -> Vec<String> {
    all_texts(document, selectors::BREADCRUMBS)
}

fn extract_about_item(document: &Html) -> Vec<String> {
    all_texts(document, selectors::ABOUT_ITEM)
}
