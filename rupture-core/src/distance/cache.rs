//! Concurrent read-through memo of section distances.
//!
//! Keys are unordered section pairs, so `(a, b)` and `(b, a)` share one
//! entry. Concurrent misses on the same pair may both consult the wrapped
//! provider, but only the first value stored is ever returned.

use dashmap::DashMap;
use tracing::{instrument, warn};

use crate::{
    distance::DistanceProvider, error::DistanceError, jump::SectionPair, section::SectionId,
};

/// Memoizing wrapper around a [`DistanceProvider`].
///
/// The wrapper is `Send + Sync` whenever the wrapped provider is, so a single
/// instance can back rupture searches running on many threads.
///
/// # Examples
/// ```
/// use rupture_core::{CachedDistances, DistanceError, DistanceProvider, SectionId};
///
/// struct AlongStrike;
///
/// impl DistanceProvider for AlongStrike {
///     fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
///         Ok(f64::from(left.get().abs_diff(right.get())))
///     }
/// }
///
/// let cache = CachedDistances::new(AlongStrike);
/// assert_eq!(cache.distance(SectionId::new(1), SectionId::new(4))?, 3.0);
/// assert_eq!(cache.distance(SectionId::new(4), SectionId::new(1))?, 3.0);
/// assert_eq!(cache.len(), 1);
/// # Ok::<(), DistanceError>(())
/// ```
#[derive(Debug)]
pub struct CachedDistances<P> {
    inner: P,
    entries: DashMap<SectionPair, f64>,
}

impl<P: DistanceProvider> CachedDistances<P> {
    /// Wraps `inner` with an empty memo.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
        }
    }

    /// Returns the wrapped provider.
    #[rustfmt::skip]
    pub fn inner(&self) -> &P { &self.inner }

    /// Returns the number of memoized pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(feature = "metrics")]
    fn record_hit(&self) {
        metrics::counter!("section_distance_cache_hits").increment(1);
    }

    #[cfg(not(feature = "metrics"))]
    fn record_hit(&self) {}

    #[cfg(feature = "metrics")]
    fn record_miss(&self) {
        metrics::counter!("section_distance_cache_misses").increment(1);
    }

    #[cfg(not(feature = "metrics"))]
    fn record_miss(&self) {}
}

impl<P: DistanceProvider> DistanceProvider for CachedDistances<P> {
    #[instrument(level = "trace", skip(self))]
    fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
        let key = SectionPair::new(left, right);
        if let Some(hit) = self.entries.get(&key) {
            self.record_hit();
            return Ok(*hit);
        }
        self.record_miss();

        let value = self.inner.distance(key.low(), key.high())?;
        if !value.is_finite() {
            warn!(%key, %value, "rejecting non-finite section distance");
            return Err(DistanceError::NonFinite { left, right });
        }
        Ok(*self.entries.entry(key).or_insert(value))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl DistanceProvider for CountingProvider {
        fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            match (left.get(), right.get()) {
                (0, _) | (_, 0) => Err(DistanceError::UnknownSection {
                    section: SectionId::new(0),
                }),
                (99, _) | (_, 99) => Ok(f64::NAN),
                (a, b) => Ok(f64::from(a.abs_diff(b))),
            }
        }
    }

    #[test]
    fn memoizes_both_orientations_under_one_key() {
        let cache = CachedDistances::new(CountingProvider::default());
        let forward = cache
            .distance(SectionId::new(3), SectionId::new(8))
            .expect("lookup must succeed");
        let backward = cache
            .distance(SectionId::new(8), SectionId::new(3))
            .expect("lookup must succeed");

        assert_eq!(forward, 5.0);
        assert_eq!(backward, 5.0);
        assert_eq!(cache.inner().calls.load(Ordering::Relaxed), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn provider_errors_are_not_memoized() {
        let cache = CachedDistances::new(CountingProvider::default());
        for _ in 0..2 {
            let err = cache
                .distance(SectionId::new(0), SectionId::new(1))
                .expect_err("unknown section must fail");
            assert!(matches!(err, DistanceError::UnknownSection { .. }));
        }
        assert!(cache.is_empty());
        assert_eq!(cache.inner().calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn rejects_non_finite_distances() {
        let cache = CachedDistances::new(CountingProvider::default());
        let err = cache
            .distance(SectionId::new(99), SectionId::new(1))
            .expect_err("NaN must be rejected");
        assert_eq!(
            err,
            DistanceError::NonFinite {
                left: SectionId::new(99),
                right: SectionId::new(1),
            }
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_readers_share_one_memo() {
        let cache = CachedDistances::new(CountingProvider::default());
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for id in 1..=16 {
                        let distance = cache
                            .distance(SectionId::new(id), SectionId::new(id + 20))
                            .expect("lookup must succeed");
                        assert_eq!(distance, 20.0);
                    }
                });
            }
        });
        assert_eq!(cache.len(), 16);
        let calls = cache.inner().calls.load(Ordering::Relaxed);
        assert!((16..=64).contains(&calls), "unexpected call count {calls}");
    }
}
