//! Memoized diff results
//!
//! The viewer re-renders on every key press, but the diff only changes when
//! one of the two documents does. The cache keys the last result on the
//! exact `(original, modified, lookahead)` triple.

use super::diff::{compute_diff_with_lookahead, DiffResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    original: String,
    modified: String,
    lookahead: usize,
}

/// Single-entry cache of the most recent diff
#[derive(Debug, Default)]
pub struct DiffCache {
    key: Option<CacheKey>,
    result: DiffResult,
    /// Number of times the engine actually ran
    computations: usize,
}

impl DiffCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the diff for this pair, running the engine only on a miss
    pub fn get_or_compute(&mut self, original: &str, modified: &str, lookahead: usize) -> &DiffResult {
        let hit = self.key.as_ref().is_some_and(|key| {
            key.lookahead == lookahead && key.original == original && key.modified == modified
        });

        if !hit {
            self.result = compute_diff_with_lookahead(original, modified, lookahead);
            self.key = Some(CacheKey {
                original: original.to_string(),
                modified: modified.to_string(),
                lookahead,
            });
            self.computations += 1;
            tracing::debug!(
                lines = self.result.len(),
                computations = self.computations,
                "diff recomputed"
            );
        }

        &self.result
    }

    /// Cached result, if any, without computing
    pub fn cached(&self) -> Option<&DiffResult> {
        self.key.as_ref().map(|_| &self.result)
    }

    /// Drop the cached entry so the next lookup recomputes
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_does_not_recompute() {
        let mut cache = DiffCache::new();
        let first = cache.get_or_compute("a\nb", "a\nc", 3).clone();
        let second = cache.get_or_compute("a\nb", "a\nc", 3).clone();
        assert_eq!(first, second);
        assert_eq!(cache.computations(), 1);
    }

    #[test]
    fn test_cache_miss_on_changed_input() {
        let mut cache = DiffCache::new();
        cache.get_or_compute("a", "b", 3);
        cache.get_or_compute("b", "a", 3);
        cache.get_or_compute("b", "a", 1);
        assert_eq!(cache.computations(), 3);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = DiffCache::new();
        assert!(cache.cached().is_none());
        cache.get_or_compute("a", "a", 3);
        assert!(cache.cached().is_some());
        cache.invalidate();
        assert!(cache.cached().is_none());
        cache.get_or_compute("a", "a", 3);
        assert_eq!(cache.computations(), 2);
    }
}
