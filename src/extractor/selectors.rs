//! CSS selectors for each product field, in priority order.

pub const TITLE: &[&str] = &["#productTitle", "#title"];

pub const PRICE: &[&str] = &[
    "#corePrice_feature_div .a-price .a-offscreen",
    "#corePriceDisplay_desktop_feature_div .a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price .a-offscreen",
    ".a-price",
];

pub const RATING_ALT: &[&str] = &[
    "#acrPopover .a-icon-alt",
    "#averageCustomerReviews .a-icon-alt",
];

pub const RATING_WIDGET: &[&str] = &["#averageCustomerReviews", "#acrPopover"];

pub const STAR_FULL: &str = "i.a-star-full, i.a-icon-star-full";

pub const STAR_HALF: &str = "i.a-star-half, i.a-icon-star-half";

pub const REVIEW_COUNT: &[&str] = &["#acrCustomerReviewText"];

pub const IMAGE: &[&str] = &["#landingImage", "#imgBlkFront", "#main-image"];

pub const BREADCRUMBS: &str = "#wayfinding-breadcrumbs_feature_div ul li a";

pub const ABOUT_ITEM: &str = "#feature-bullets ul li";

/// Every selector above with the field it feeds, for diagnostics.
pub fn all() -> Vec<(&'static str, &'static str)> {
    let mut entries = Vec::new();
    for (field, list) in [
        ("title", TITLE),
        ("price", PRICE),
        ("rating", RATING_ALT),
        ("rating widget", RATING_WIDGET),
        ("num_ratings", REVIEW_COUNT),
        ("image_url", IMAGE),
    ] {
        entries.extend(list.iter().map(|selector| (field, *selector)));
    }
    entries.push(("rating (full stars)", STAR_FULL));
    entries.push(("rating (half stars)", STAR_HALF));
    entries.push(("breadcrumbs", BREADCRUMBS));
    entries.push(("about_item", ABOUT_ITEM));
    entries
}
