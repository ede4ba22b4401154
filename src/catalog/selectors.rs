//! CSS selectors for catalog page parsing.
//!
//! Update this file when the site changes its listing markup, and add a
//! fixture under `tests/fixtures/` reproducing the new layout.

use scraper::Selector;
use std::sync::LazyLock;

/// Literal text the site renders in place of listings past the last page.
pub const END_OF_CATALOG_MARKER: &str = "No books available!";

/// One product entry on a catalog page.
pub static LISTING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.product_pod").unwrap());

/// Link inside the listing heading; carries both `title` and `href`.
pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 a").unwrap());

/// Attribute on [`TITLE_LINK`] holding the full (untruncated) title.
pub const TITLE_ATTR: &str = "title";

/// Attribute on [`TITLE_LINK`] holding the detail page path.
pub const HREF_ATTR: &str = "href";

/// Price text, e.g. `£51.77`.
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.price_color").unwrap());

/// Stock status text.
pub static AVAILABILITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.instock.availability").unwrap());
