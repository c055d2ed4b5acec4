use crate::core::{catalog::Catalog, filters::filter_entries, ranker::rank};
use crate::models::{RankedResult, SearchLimits, SearchQuery};

/// Result of a proximity search
#[derive(Debug)]
pub struct SearchResult<'a> {
    pub results: Vec<RankedResult<'a>>,
    /// Entries in the catalog
    pub total_candidates: usize,
    /// Entries that passed filters and radius, before the limit
    pub total_matches: usize,
}

/// Proximity search over one catalog
///
/// # Pipeline Stages
/// 1. Attribute filtering
/// 2. Distance ranking (with optional radius)
/// 3. Limit
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    limits: SearchLimits,
}

impl Locator {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Effective limit for a request: default when absent, capped at the max
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.limits.default_limit)
            .min(self.limits.max_limit)
    }

    pub fn search<'a>(&self, catalog: &'a Catalog, query: &SearchQuery) -> SearchResult<'a> {
        let total_candidates = catalog.len();
        let radius_km = query.radius_km.or(self.limits.default_radius_km);

        let filtered = filter_entries(catalog.all(), &query.criteria);
        let mut results = rank(filtered, query.origin, radius_km);
        let total_matches = results.len();

        results.truncate(self.effective_limit(query.limit));

        tracing::debug!(
            catalog = catalog.name(),
            total_candidates,
            total_matches,
            returned = results.len(),
            "Proximity search complete"
        );

        SearchResult {
            results,
            total_candidates,
            total_matches,
        }
    }
}
