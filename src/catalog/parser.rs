//! HTML parser for catalog listing pages.

use crate::catalog::models::BookRecord;
use crate::catalog::selectors::{self, END_OF_CATALOG_MARKER};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Why a single listing element could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("listing has no title link")]
    MissingLink,

    #[error("title link has no `title` attribute")]
    MissingTitle,

    #[error("title link has no `href` attribute")]
    MissingHref,

    #[error("listing has no price element")]
    MissingPrice,

    #[error("listing has no availability element")]
    MissingAvailability,

    #[error("listing field `{0}` is empty")]
    EmptyField(&'static str),
}

/// Parser for catalog pages of one site.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a parser resolving relative links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Returns true if the page says the catalog has run out of books.
    pub fn is_end_of_catalog(html: &str) -> bool {
        html.contains(END_OF_CATALOG_MARKER)
    }

    /// Extracts every well-formed listing on the page, in document order.
    ///
    /// Malformed listings are logged and skipped; they never abort the page.
    pub fn parse_listing(&self, html: &str) -> Vec<BookRecord> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for (index, element) in document.select(&selectors::LISTING).enumerate() {
            match self.parse_book(element) {
                Ok(record) => {
                    trace!("Parsed book: {}", record.title);
                    records.push(record);
                }
                Err(e) => {
                    warn!("Skipping listing #{}: {}", index + 1, e);
                }
            }
        }

        debug!("Parsed {} books from page", records.len());
        records
    }

    fn parse_book(&self, element: ElementRef) -> Result<BookRecord, ListingError> {
        let link = element.select(&selectors::TITLE_LINK).next().ok_or(ListingError::MissingLink)?;

        let title = link
            .value()
            .attr(selectors::TITLE_ATTR)
            .map(str::trim)
            .ok_or(ListingError::MissingTitle)?;
        non_empty("title", title)?;

        let href = link
            .value()
            .attr(selectors::HREF_ATTR)
            .map(str::trim)
            .ok_or(ListingError::MissingHref)?;
        non_empty("link", href)?;

        let price = text_of(element, &selectors::PRICE).ok_or(ListingError::MissingPrice)?;
        non_empty("price", &price)?;

        let availability = text_of(element, &selectors::AVAILABILITY)
            .ok_or(ListingError::MissingAvailability)?;
        non_empty("availability", &availability)?;

        Ok(BookRecord {
            title: title.to_string(),
            price,
            availability,
            link: self.resolve_link(href),
        })
    }

    /// Prefixes relative hrefs with the base URL; absolute ones pass through.
    ///
    /// A leading `/` on the href is dropped, since the base URL already
    /// ends in one.
    pub fn resolve_link(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href.trim_start_matches('/'))
        }
    }
}

/// Text of the first match, trimmed, with inner runs of whitespace
/// collapsed to one space (the site indents stock text across lines).
fn text_of(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|e| {
        let text = e.text().collect::<String>();
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    })
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ListingError> {
    if value.is_empty() {
        Err(ListingError::EmptyField(field))
    } else {
        Ok(())
    }
}
