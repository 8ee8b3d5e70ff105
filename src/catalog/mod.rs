mod catalog_error;
mod client;
mod query;

pub use catalog_error::CatalogError;
pub use client::{CatalogClient, InventorySource};
pub use query::{CatalogQuery, DEFAULT_CATALOG_URL};
