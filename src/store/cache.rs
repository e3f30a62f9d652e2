//! Process-wide memoization of loaded resources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use super::bundle::{BundleError, DataBundle};

/// Resources keyed by the path they were loaded from.
///
/// Loading happens outside the lock, so two threads may load the same path
/// at once; the first value stored wins and both callers receive it.
pub struct ResourceCache<T> {
    entries: RwLock<HashMap<PathBuf, Arc<T>>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> ResourceCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `path`, loading it on first use.
    pub fn get_or_load<E>(&self, path: &Path, load: impl FnOnce(&Path) -> Result<T, E>) -> Result<Arc<T>, E> {
        if let Some(hit) = self.entries.read().get(path) {
            return Ok(Arc::clone(hit));
        }
        debug!(path = %path.display(), "resource cache miss");
        let value = Arc::new(load(path)?);
        let mut entries = self.entries.write();
        Ok(Arc::clone(entries.entry(path.to_path_buf()).or_insert(value)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

static BUNDLES: Lazy<ResourceCache<DataBundle>> = Lazy::new(ResourceCache::new);

/// Loads a data bundle once per path for the life of the process.
pub fn load_bundle_cached(path: &Path) -> Result<Arc<DataBundle>, BundleError> {
    BUNDLES.get_or_load(path, DataBundle::load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_loads_once_per_path() {
        let cache: ResourceCache<String> = ResourceCache::new();
        let calls = AtomicUsize::new(0);
        let load = |p: &Path| -> Result<String, ()> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(p.display().to_string())
        };
        let a = cache.get_or_load(Path::new("a.json"), load).unwrap();
        let again = cache.get_or_load(Path::new("a.json"), load).unwrap();
        let b = cache.get_or_load(Path::new("b.json"), load).unwrap();
        assert_eq!(*a, "a.json");
        assert!(Arc::ptr_eq(&a, &again));
        assert_eq!(*b, "b.json");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache: ResourceCache<u32> = ResourceCache::new();
        let result = cache.get_or_load(Path::new("x"), |_| Err::<u32, _>("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(cache.is_empty());
        let value = cache.get_or_load(Path::new("x"), |_| Ok::<u32, &str>(7)).unwrap();
        assert_eq!(*value, 7);
    }

    #[test]
    fn test_concurrent_loads_agree() {
        use rayon::prelude::*;
        let cache: ResourceCache<u64> = ResourceCache::new();
        let values: Vec<Arc<u64>> = (0..32u64)
            .into_par_iter()
            .map(|i| cache.get_or_load(Path::new("shared"), |_| Ok::<u64, ()>(i)).unwrap())
            .collect();
        assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_bundle_error() {
        assert!(load_bundle_cached(Path::new("/nonexistent/strec-bundle.json")).is_err());
    }
}
