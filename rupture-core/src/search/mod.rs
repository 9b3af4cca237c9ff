//! Minimum-cost path search between clusters of a rupture.
//!
//! For every cluster pair the search enumerates simple paths depth first over
//! the [`ConnectionGraph`], pruning any partial path that already costs more
//! than the best complete path. Only the first jump of each retained shortest
//! path survives as a rupture connection; later hops are rediscovered by the
//! searches rooted at the intermediate clusters.

use tracing::trace;

use crate::{
    graph::{ConnectionGraph, Edge},
    jump::Jump,
};

/// Costs closer than this are treated as equal.
const COST_TOLERANCE: f64 = 1e-9;

/// How jump distances along a path combine into the path cost.
///
/// Both modes are monotone: extending a path never lowers its cost.
///
/// # Examples
/// ```
/// use rupture_core::CostMode;
///
/// assert_eq!(CostMode::default(), CostMode::Bottleneck);
/// assert_eq!(CostMode::Bottleneck.extend(2.0, 1.5), 2.0);
/// assert_eq!(CostMode::Cumulative.extend(2.0, 1.5), 3.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CostMode {
    /// The largest single jump distance along the path.
    #[default]
    Bottleneck,
    /// The sum of jump distances along the path.
    Cumulative,
}

impl CostMode {
    /// Returns the cost of a path of cost `cost` extended by a jump of length
    /// `distance`.
    #[must_use]
    pub fn extend(self, cost: f64, distance: f64) -> f64 {
        match self {
            Self::Bottleneck => cost.max(distance),
            Self::Cumulative => cost + distance,
        }
    }
}

/// An immutable partial path. Extending it yields a new value.
#[derive(Clone, Debug)]
pub(crate) struct ClusterPath {
    clusters: Vec<usize>,
    jumps: Vec<Jump>,
    available: Vec<bool>,
    cost: f64,
}

impl ClusterPath {
    fn start(origin: usize, cluster_count: usize) -> Self {
        let mut available = vec![true; cluster_count];
        if let Some(slot) = available.get_mut(origin) {
            *slot = false;
        }
        Self {
            clusters: vec![origin],
            jumps: Vec::new(),
            available,
            cost: 0.0,
        }
    }

    fn tail(&self) -> Option<usize> {
        self.clusters.last().copied()
    }

    fn is_available(&self, cluster: usize) -> bool {
        self.available.get(cluster).copied().unwrap_or(false)
    }

    fn extend(&self, edge: &Edge, mode: CostMode) -> Self {
        let mut next = self.clone();
        next.clusters.push(edge.target());
        next.jumps.push(edge.jump().clone());
        if let Some(slot) = next.available.get_mut(edge.target()) {
            *slot = false;
        }
        next.cost = mode.extend(self.cost, edge.distance());
        next
    }

    /// The cluster entered by the first jump.
    pub(crate) fn first_hop(&self) -> Option<usize> {
        self.clusters.get(1).copied()
    }

    pub(crate) fn first_jump(&self) -> Option<&Jump> {
        self.jumps.first()
    }

    #[rustfmt::skip]
    pub(crate) fn clusters(&self) -> &[usize] { &self.clusters }
}

/// Best cost of one search and the tied paths that reach it.
#[derive(Clone, Debug, Default)]
pub(crate) struct PathResult {
    best: Option<f64>,
    paths: Vec<ClusterPath>,
}

impl PathResult {
    /// Returns `true` when a partial path of this cost can no longer tie or
    /// beat the best complete path.
    fn prunes(&self, cost: f64) -> bool {
        self.best.is_some_and(|best| cost > best + COST_TOLERANCE)
    }

    fn register(&mut self, path: ClusterPath) {
        match self.best {
            Some(best) if path.cost > best + COST_TOLERANCE => {}
            Some(best) if path.cost >= best - COST_TOLERANCE => {
                let hop = path.first_hop();
                if self.paths.iter().all(|kept| kept.first_hop() != hop) {
                    self.paths.push(path);
                }
            }
            _ => {
                self.best = Some(path.cost);
                self.paths = vec![path];
            }
        }
    }

    #[rustfmt::skip]
    pub(crate) const fn best(&self) -> Option<f64> { self.best }

    #[rustfmt::skip]
    pub(crate) fn paths(&self) -> &[ClusterPath] { &self.paths }
}

/// Depth-first shortest path search over one rupture's connection graph.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathSearch<'g> {
    graph: &'g ConnectionGraph,
    mode: CostMode,
}

impl<'g> PathSearch<'g> {
    pub(crate) const fn new(graph: &'g ConnectionGraph, mode: CostMode) -> Self {
        Self { graph, mode }
    }

    /// Finds the cheapest paths from `start` to `target`.
    ///
    /// Every cluster other than `start` may be used at most once per path.
    pub(crate) fn shortest_paths(&self, start: usize, target: usize) -> PathResult {
        let mut result = PathResult::default();
        let mut stack = vec![ClusterPath::start(start, self.graph.len())];

        while let Some(path) = stack.pop() {
            if result.prunes(path.cost) {
                continue;
            }
            let Some(tail) = path.tail() else {
                continue;
            };
            if tail == target {
                result.register(path);
                continue;
            }
            for edge in self.graph.neighbors(tail).iter().rev() {
                if !path.is_available(edge.target()) {
                    continue;
                }
                let next = path.extend(edge, self.mode);
                if !result.prunes(next.cost) {
                    stack.push(next);
                }
            }
        }
        result
    }

    /// Runs a search for every cluster pair, earlier cluster first, and
    /// collects the first jump of each retained path.
    ///
    /// The result may repeat a connection; deduplication happens downstream.
    pub(crate) fn first_jumps(&self) -> Vec<Jump> {
        let count = self.graph.len();
        let mut jumps = Vec::new();
        for start in 0..count {
            for target in (start + 1)..count {
                let result = self.shortest_paths(start, target);
                trace!(
                    start,
                    target,
                    best = ?result.best(),
                    tied = result.paths().len(),
                    "cluster pair searched"
                );
                jumps.extend(
                    result
                        .paths()
                        .iter()
                        .filter_map(ClusterPath::first_jump)
                        .cloned(),
                );
            }
        }
        jumps
    }
}

#[cfg(test)]
mod tests;
