use serde::{Deserialize, Serialize};

/// Placeholder for a scalar field that could not be located on the page.
pub const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub url: String,
    pub title: String,
    pub price: String,
    pub rating: String,
    pub num_ratings: String,
    pub image_url: String,
    pub breadcrumbs: Vec<String>,
    pub about_item: Vec<String>,
}

impl ProductRecord {
    /// A record for `url` with every field set to its fallback.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: NOT_AVAILABLE.to_string(),
            price: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            num_ratings: NOT_AVAILABLE.to_string(),
            image_url: NOT_AVAILABLE.to_string(),
            breadcrumbs: Vec::new(),
            about_item: Vec::new(),
        }
    }

    pub fn is_available(value: &str) -> bool {
        value != NOT_AVAILABLE
    }

    /// Number of scalar fields that hold real page data.
    pub fn available_field_count(&self) -> usize {
        [
            &self.title,
            &self.price,
            &self.rating,
            &self.num_ratings,
            &self.image_url,
        ]
        .iter()
        .filter(|value| Self::is_available(value))
        .count()
    }
}
