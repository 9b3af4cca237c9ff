//! Entry points turning a rupture's sections into jumps and trees.

use std::num::NonZeroUsize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    cluster::clusterize,
    dedup::deduplicate_jumps,
    error::RuptureError,
    graph::ConnectionGraph,
    isolation::IsolationScorer,
    jump::Jump,
    rupture::ClusterRupture,
    search::{CostMode, PathSearch},
    section::FaultSection,
    strategy::ConnectionStrategy,
    tree::RuptureTreeBuilder,
};

/// How the first cluster of a tree is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StartPolicy {
    /// The least connected cluster.
    Isolation,
    /// The cluster holding the first input section.
    FirstSection,
}

/// Resolved connectivity of one rupture.
struct Connections {
    graph: ConnectionGraph,
    jumps: Vec<Jump>,
}

/// Reconstructs how a multi-fault rupture jumps between its faults.
///
/// Construct instances with [`crate::ConnectionSearchBuilder`]. A search is
/// stateless between calls, so one instance can serve many ruptures,
/// including concurrently when the strategy is `Sync`.
///
/// # Examples
/// ```
/// use rupture_core::{
///     CachedDistances, ClosestSectionStrategy, ConnectionSearchBuilder, DistanceError,
///     DistanceProvider, FaultSection, SectionId,
/// };
///
/// struct AlongStrike;
///
/// impl DistanceProvider for AlongStrike {
///     fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
///         Ok(f64::from(left.get().abs_diff(right.get())))
///     }
/// }
///
/// let strategy = ClosestSectionStrategy::new(CachedDistances::new(AlongStrike))
///     .with_max_jump_distance(3.0)?;
/// let search = ConnectionSearchBuilder::new().build(strategy)?;
/// let sections = [
///     FaultSection::new(1, 1),
///     FaultSection::new(2, 1),
///     FaultSection::new(4, 2),
///     FaultSection::new(5, 2),
///     FaultSection::new(7, 3),
/// ];
///
/// let jumps = search.find_jumps(&sections)?;
/// assert_eq!(jumps.len(), 2);
///
/// let rupture = search.build_rupture(&sections)?;
/// assert_eq!(rupture.cluster_count(), 3);
/// assert_eq!(rupture.jump_count(), 2);
/// # Ok::<(), rupture_core::RuptureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionSearch<S> {
    strategy: S,
    cost_mode: CostMode,
    max_clusters: Option<NonZeroUsize>,
}

impl<S: ConnectionStrategy> ConnectionSearch<S> {
    pub(crate) const fn new(
        strategy: S,
        cost_mode: CostMode,
        max_clusters: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            strategy,
            cost_mode,
            max_clusters,
        }
    }

    /// Returns the connection strategy.
    #[rustfmt::skip]
    #[must_use]
    pub const fn strategy(&self) -> &S { &self.strategy }

    /// Returns the configured cost mode.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cost_mode(&self) -> CostMode { self.cost_mode }

    /// Returns the configured cluster ceiling, if any.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_clusters(&self) -> Option<NonZeroUsize> { self.max_clusters }

    /// Returns the deduplicated jumps connecting the clusters of a rupture.
    ///
    /// Jumps are oriented from their lower section id and listed in the order
    /// cluster pairs were searched. Equal-cost alternatives can leave more
    /// than `K - 1` jumps for `K` clusters.
    ///
    /// # Errors
    /// Returns [`RuptureError::EmptyRupture`] or
    /// [`RuptureError::DuplicateSection`] for malformed input,
    /// [`RuptureError::TooManyClusters`] above the configured ceiling, and
    /// [`RuptureError::Strategy`] when the strategy fails.
    #[instrument(
        name = "search.find_jumps",
        err,
        skip(self, sections),
        fields(sections = sections.len(), cost_mode = ?self.cost_mode),
    )]
    pub fn find_jumps(&self, sections: &[FaultSection]) -> Result<Vec<Jump>> {
        Ok(self.connect(sections)?.jumps)
    }

    /// Builds the canonical tree of a rupture, starting from its least
    /// connected cluster.
    ///
    /// The result does not depend on the order of `sections`.
    ///
    /// # Errors
    /// Returns the errors of [`Self::find_jumps`], plus
    /// [`RuptureError::DisconnectedRupture`] when some cluster cannot be
    /// reached through the discovered jumps.
    pub fn build_rupture(&self, sections: &[FaultSection]) -> Result<ClusterRupture> {
        self.build_tree(sections, StartPolicy::Isolation)
    }

    /// Builds a tree that starts from the cluster holding `sections[0]`,
    /// preserving the caller's chosen starting point.
    ///
    /// # Errors
    /// Same as [`Self::build_rupture`].
    pub fn build_rupture_from_first_section(
        &self,
        sections: &[FaultSection],
    ) -> Result<ClusterRupture> {
        self.build_tree(sections, StartPolicy::FirstSection)
    }

    /// Builds one tree rooted at each cluster in turn, in cluster order.
    ///
    /// # Errors
    /// Same as [`Self::build_rupture`].
    #[instrument(
        name = "search.alternatives",
        err,
        skip(self, sections),
        fields(sections = sections.len(), cost_mode = ?self.cost_mode),
    )]
    pub fn alternative_ruptures(&self, sections: &[FaultSection]) -> Result<Vec<ClusterRupture>> {
        let connections = self.connect(sections)?;
        let builder = RuptureTreeBuilder::new(&connections.graph, &connections.jumps);
        (0..connections.graph.len())
            .map(|start| builder.build(start))
            .collect()
    }

    /// Builds canonical trees for many ruptures in parallel.
    ///
    /// Results keep the order of `ruptures`; one failing rupture does not
    /// affect the others.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[instrument(name = "search.build_ruptures", skip_all, fields(ruptures = ruptures.len()))]
    pub fn build_ruptures<R>(&self, ruptures: &[R]) -> Vec<Result<ClusterRupture>>
    where
        R: AsRef<[FaultSection]> + Sync,
        S: Sync,
    {
        ruptures
            .par_iter()
            .map(|sections| self.build_rupture(sections.as_ref()))
            .collect()
    }

    #[instrument(
        name = "search.build_rupture",
        err,
        skip(self, sections),
        fields(sections = sections.len(), cost_mode = ?self.cost_mode),
    )]
    fn build_tree(&self, sections: &[FaultSection], policy: StartPolicy) -> Result<ClusterRupture> {
        let connections = self.connect(sections)?;
        let start = match policy {
            StartPolicy::Isolation => {
                IsolationScorer::new(&connections.graph, &connections.jumps).choose_start()
            }
            StartPolicy::FirstSection => sections
                .first()
                .and_then(|section| connections.graph.cluster_of(section.id()))
                .ok_or(RuptureError::EmptyRupture)?,
        };
        RuptureTreeBuilder::new(&connections.graph, &connections.jumps).build(start)
    }

    fn connect(&self, sections: &[FaultSection]) -> Result<Connections> {
        let clusters = clusterize(sections)?;
        if let Some(limit) = self.max_clusters
            && clusters.len() > limit.get()
        {
            return Err(RuptureError::TooManyClusters {
                clusters: clusters.len(),
                limit,
            });
        }

        let graph = ConnectionGraph::build(clusters, &self.strategy)?;
        let jumps = deduplicate_jumps(PathSearch::new(&graph, self.cost_mode).first_jumps());
        debug!(
            clusters = graph.len(),
            candidate_links = graph.edge_count(),
            jumps = jumps.len(),
            "rupture connections resolved"
        );
        Ok(Connections { graph, jumps })
    }
}
