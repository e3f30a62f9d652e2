//! Loading and caching of read-only classification resources.

mod bundle;
mod cache;

pub use bundle::{BundleError, BundleLayers, DataBundle};
pub use cache::{load_bundle_cached, ResourceCache};
