//! Bounded memoisation of exporter output

use indexmap::IndexMap;
use tracing::debug;

use super::cyclonedx::CycloneDxBom;
use super::exporter::{ExportRequest, SbomExporter};
use crate::constants::export::CACHE_CAPACITY;
use crate::error::DepGraphError;

/// Least-recently-used cache of raw exporter output
///
/// Entries are kept in recency order: index 0 is the least recently used,
/// the last index the most recently used.
#[derive(Debug)]
pub struct SbomCache {
    capacity: usize,
    entries: IndexMap<ExportRequest, String>,
}

impl Default for SbomCache {
    fn default() -> Self {
        Self::new(CACHE_CAPACITY)
    }
}

impl SbomCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, request: &ExportRequest) -> bool {
        self.entries.contains_key(request)
    }

    /// Look up a request and mark it as most recently used
    pub fn get(&mut self, request: &ExportRequest) -> Option<&str> {
        let raw = self.entries.shift_remove(request)?;
        self.entries.insert(request.clone(), raw);
        self.entries.last().map(|(_, raw)| raw.as_str())
    }

    /// Insert a value, evicting the least recently used entry when full
    pub fn insert(&mut self, request: ExportRequest, raw: String) {
        if self.entries.contains_key(&request) {
            self.entries.shift_remove(&request);
        } else if self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                debug!(request = ?evicted, "evicting SBOM cache entry");
            }
        }
        self.entries.insert(request, raw);
    }
}

/// Exporter front-end that memoises raw output and parses it
pub struct SbomFetcher<E> {
    exporter: E,
    cache: SbomCache,
}

impl<E: SbomExporter> SbomFetcher<E> {
    pub fn new(exporter: E) -> Self {
        Self {
            exporter,
            cache: SbomCache::default(),
        }
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn cache(&self) -> &SbomCache {
        &self.cache
    }

    /// Return the raw JSON for a request, invoking the exporter on a miss
    pub fn fetch_raw(&mut self, request: &ExportRequest) -> Result<String, DepGraphError> {
        if let Some(raw) = self.cache.get(request) {
            debug!(request = ?request, "SBOM cache hit");
            return Ok(raw.to_string());
        }

        debug!(request = ?request, "SBOM cache miss");
        let raw = self.exporter.export(request)?;
        self.cache.insert(request.clone(), raw.clone());
        Ok(raw)
    }

    /// Fetch and parse the SBOM for a request
    pub fn fetch(&mut self, request: &ExportRequest) -> Result<CycloneDxBom, DepGraphError> {
        let raw = self.fetch_raw(request)?;
        CycloneDxBom::from_json(&raw)
    }
}
