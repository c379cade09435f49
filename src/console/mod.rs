//! Operator-facing output: product blocks, run summaries, prompts, spinner.

pub mod prompt;
pub mod spinner;

pub use prompt::{Prompt, SaveChoice};
pub use spinner::Spinner;

use std::fmt::Write;

use crate::models::{
    ProductRecord, ScrapeMode, SessionSummary, BREADCRUMB_SEPARATOR, GLYPH_CATEGORY,
    GLYPH_CHECK, GLYPH_CROSS, GLYPH_IMAGE, GLYPH_LINK, GLYPH_PRICE, GLYPH_RATING, NOT_AVAILABLE,
};

const RULE_WIDTH: usize = 60;

pub fn render_product(record: &ProductRecord) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", record.title);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{} Price: {}", GLYPH_PRICE, record.price);

    let category = if record.breadcrumbs.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        record.breadcrumbs.join(BREADCRUMB_SEPARATOR)
    };
    let _ = writeln!(out, "{} Category: {}", GLYPH_CATEGORY, category);

    let _ = writeln!(out, "{} Rating: {}", GLYPH_RATING, rating_line(record));
    let _ = writeln!(out, "{} Image: {}", GLYPH_IMAGE, record.image_url);
    let _ = writeln!(out, "{} URL: {}", GLYPH_LINK, record.url);

    if !record.about_item.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "About this item:");
        for (i, bullet) in record.about_item.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, bullet);
        }
    }

    out
}

fn rating_line(record: &ProductRecord) -> String {
    match (
        ProductRecord::is_available(&record.rating),
        ProductRecord::is_available(&record.num_ratings),
    ) {
        (true, true) => format!("{}/5 ({} ratings)", record.rating, record.num_ratings),
        (true, false) => format!("{}/5", record.rating),
        (false, true) => format!("{} ({} ratings)", NOT_AVAILABLE, record.num_ratings),
        (false, false) => NOT_AVAILABLE.to_string(),
    }
}

pub fn render_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();

    if summary.mode == ScrapeMode::Bulk {
        let _ = writeln!(
            out,
            "{} {}/{} products scraped successfully",
            GLYPH_CHECK, summary.total_succeeded, summary.total_requested
        );
        let _ = writeln!(out);
    }

    for record in summary.records() {
        out.push_str(&render_product(record));
        let _ = writeln!(out);
    }

    for failure in summary.failures() {
        let kind = failure
            .error_kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "error".to_string());
        let _ = writeln!(
            out,
            "{} {} [{}]: {}",
            GLYPH_CROSS,
            failure.url,
            kind,
            failure.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::RunResult;

    fn record() -> ProductRecord {
        ProductRecord {
            url: "https://www.amazon.com/dp/B07FZ8S74R".to_string(),
            title: "Echo Dot (4th Gen)".to_string(),
            price: "$49.99".to_string(),
            rating: "4.7".to_string(),
            num_ratings: "125,432".to_string(),
            image_url: "https://m.media-amazon.com/images/I/large.jpg".to_string(),
            breadcrumbs: vec!["Electronics".to_string(), "Smart Home".to_string()],
            about_item: vec!["Meet Echo Dot".to_string(), "Voice control".to_string()],
        }
    }

    #[test]
    fn product_block_lists_every_field() {
        let text = render_product(&record());
        assert!(text.contains("Echo Dot (4th Gen)"));
        assert!(text.contains("Price: $49.99"));
        assert!(text.contains("Category: Electronics › Smart Home"));
        assert!(text.contains("Rating: 4.7/5 (125,432 ratings)"));
        assert!(text.contains("  1. Meet Echo Dot\n  2. Voice control"));
    }

    #[test]
    fn fallback_record_renders_placeholders() {
        let text = render_product(&ProductRecord::empty("https://www.amazon.com/dp/B07FZ8S74R"));
        assert!(text.contains("Category: Not available"));
        assert!(text.contains("Rating: Not available"));
        assert!(!text.contains("About this item"));
    }

    #[test]
    fn bulk_summary_leads_with_success_count() {
        let summary = SessionSummary::new(
            ScrapeMode::Bulk,
            vec![
                RunResult::success(record()),
                RunResult::failure("not-a-url", ErrorKind::Validation, "not an absolute URL"),
            ],
        );
        let text = render_summary(&summary);
        assert!(text.starts_with(&format!("{} 1/2 products scraped successfully", GLYPH_CHECK)));
        assert!(text.contains("not-a-url [validation]: not an absolute URL"));
    }
}
