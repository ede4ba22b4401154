//! Data model for a scraped catalog listing.

use serde::{Deserialize, Serialize};

/// One book as it appears on a catalog page.
///
/// Values are kept exactly as the site renders them: `price` keeps its
/// currency prefix and `availability` is free-form stock text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Book title (from the listing link's `title` attribute)
    pub title: String,
    /// Currency-prefixed price, e.g. `£51.77`
    pub price: String,
    /// Stock status, e.g. `In stock`
    pub availability: String,
    /// Absolute URL of the book's detail page
    pub link: String,
}

impl BookRecord {
    /// CSV column names, in field order.
    pub const HEADER: [&'static str; 4] = ["title", "price", "availability", "link"];

    /// Creates a record from its four fields.
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        availability: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            availability: availability.into(),
            link: link.into(),
        }
    }

    /// Field values in [`Self::HEADER`] order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.title, &self.price, &self.availability, &self.link]
    }
}
