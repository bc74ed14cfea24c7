//! Per-run memoizing version resolver.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::{application::ports::VersionSource, domain::ResolveVersion};

/// Wraps a [`VersionSource`] so each package is queried at most once.
///
/// Lookup failures are logged and cached as `None`. The cache is dropped
/// with the resolver, so nothing leaks across scaffold runs.
pub struct VersionResolver<'a> {
    source: &'a dyn VersionSource,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl<'a> VersionResolver<'a> {
    pub fn new(source: &'a dyn VersionSource) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve every uncached package concurrently, one thread per package.
    ///
    /// Results land in the cache; later [`ResolveVersion::resolve`] calls
    /// read them in whatever order the caller needs.
    pub fn prefetch(&self, packages: &[&str]) {
        let mut pending: Vec<&str> = Vec::new();
        for package in packages {
            if !self.is_cached(package) && !pending.contains(package) {
                pending.push(*package);
            }
        }
        if pending.is_empty() {
            return;
        }

        debug!(count = pending.len(), "Prefetching package versions");
        let resolved: Vec<(&str, Option<String>)> = std::thread::scope(|scope| {
            let handles: Vec<_> = pending
                .iter()
                .map(|package| (*package, scope.spawn(move || self.lookup(package))))
                .collect();
            handles
                .into_iter()
                .map(|(package, handle)| (package, handle.join().unwrap_or(None)))
                .collect()
        });

        if let Ok(mut cache) = self.cache.lock() {
            for (package, version) in resolved {
                cache.insert(package.to_string(), version);
            }
        }
    }

    /// Number of distinct packages looked up so far.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn is_cached(&self, package: &str) -> bool {
        self.cache
            .lock()
            .map(|c| c.contains_key(package))
            .unwrap_or(false)
    }

    fn lookup(&self, package: &str) -> Option<String> {
        match self.source.latest_version(package) {
            Ok(version) => {
                debug!(package, %version, "Resolved package version");
                Some(version)
            }
            Err(e) => {
                warn!(package, error = %e, "Version lookup failed, writing null");
                None
            }
        }
    }
}

impl ResolveVersion for VersionResolver<'_> {
    fn resolve(&self, package: &str) -> Option<String> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(package) {
                return hit.clone();
            }
        }

        let version = self.lookup(package);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(package.to_string(), version.clone());
        }
        version
    }
}
