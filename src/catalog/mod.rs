//! Catalog site modules for HTTP fetching, listing parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CatalogClient, CatalogSource};
pub use models::BookRecord;
pub use parser::{ListingError, Parser};
