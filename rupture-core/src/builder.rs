//! Builder utilities for configuring connection searches.
//!
//! Validation happens once in [`ConnectionSearchBuilder::build`], so a
//! constructed [`ConnectionSearch`] always holds a usable configuration.

use std::num::NonZeroUsize;

use crate::{
    Result, connection_search::ConnectionSearch, error::RuptureError, search::CostMode,
    strategy::ConnectionStrategy,
};

/// Configures and constructs [`ConnectionSearch`] instances.
///
/// # Examples
/// ```
/// use rupture_core::{ConnectionSearchBuilder, CostMode};
/// # use rupture_core::{ConnectionStrategy, FaultCluster, Jump, JumpError};
/// # use std::sync::Arc;
/// # struct NoJumps;
/// # impl ConnectionStrategy for NoJumps {
/// #     fn candidate_jumps(
/// #         &self,
/// #         _from: &Arc<FaultCluster>,
/// #         _to: &Arc<FaultCluster>,
/// #     ) -> Result<Vec<Jump>, JumpError> {
/// #         Ok(Vec::new())
/// #     }
/// # }
///
/// let search = ConnectionSearchBuilder::new()
///     .with_cost_mode(CostMode::Cumulative)
///     .with_max_clusters(12)
///     .build(NoJumps)
///     .expect("builder configuration is valid");
/// assert_eq!(search.cost_mode(), CostMode::Cumulative);
/// assert_eq!(search.max_clusters().map(|limit| limit.get()), Some(12));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectionSearchBuilder {
    cost_mode: CostMode,
    max_clusters: Option<usize>,
}

impl ConnectionSearchBuilder {
    /// Creates a builder using bottleneck costs and no cluster ceiling.
    ///
    /// # Examples
    /// ```
    /// use rupture_core::{ConnectionSearchBuilder, CostMode};
    ///
    /// let builder = ConnectionSearchBuilder::new();
    /// assert_eq!(builder.cost_mode(), CostMode::Bottleneck);
    /// assert_eq!(builder.max_clusters(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects how jump distances combine into a path cost.
    #[must_use]
    pub const fn with_cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// Returns the configured cost mode.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cost_mode(&self) -> CostMode { self.cost_mode }

    /// Caps the number of clusters a single rupture may contain.
    ///
    /// Path search is exponential in the cluster count, so callers needing
    /// bounded latency should set a ceiling. Zero is rejected by
    /// [`Self::build`].
    #[must_use]
    pub const fn with_max_clusters(mut self, limit: usize) -> Self {
        self.max_clusters = Some(limit);
        self
    }

    /// Returns the configured cluster ceiling, if any.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_clusters(&self) -> Option<usize> { self.max_clusters }

    /// Validates the configuration and constructs a [`ConnectionSearch`]
    /// around `strategy`.
    ///
    /// # Errors
    /// Returns [`RuptureError::InvalidMaxClusters`] when the cluster ceiling
    /// is zero.
    pub fn build<S: ConnectionStrategy>(self, strategy: S) -> Result<ConnectionSearch<S>> {
        let max_clusters = self
            .max_clusters
            .map(|limit| NonZeroUsize::new(limit).ok_or(RuptureError::InvalidMaxClusters { got: limit }))
            .transpose()?;
        Ok(ConnectionSearch::new(strategy, self.cost_mode, max_clusters))
    }
}
