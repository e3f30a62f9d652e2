//! Historical moment tensor catalog and composite tensor estimation.

mod config;
mod query;
mod composite;

pub use config::CompositeConfig;
pub use query::{CatalogError, CatalogQuery, CatalogRow, MemoryCatalog, SearchBox};
pub use composite::{CompositeEstimator, CompositeTensor, composite_from_components};
