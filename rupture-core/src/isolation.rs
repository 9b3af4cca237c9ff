//! Canonical start-cluster selection.
//!
//! Each cluster is scored by how strongly it connects to the rest of the
//! rupture. A directly connected cluster contributes a weight of one, and
//! every further hop contributes a tenth of the previous one. The least
//! connected cluster starts the tree.

use tracing::debug;

use crate::{graph::ConnectionGraph, jump::Jump};

/// Weight multiplier applied per additional hop.
const HOP_DECAY: f64 = 0.1;

/// Scores closer than this are treated as tied.
const SCORE_TOLERANCE: f64 = 1e-9;

/// Scores clusters over a deduplicated jump set.
#[derive(Debug)]
pub(crate) struct IsolationScorer<'g> {
    graph: &'g ConnectionGraph,
    links: Vec<Vec<usize>>,
}

impl<'g> IsolationScorer<'g> {
    pub(crate) fn new(graph: &'g ConnectionGraph, jumps: &[Jump]) -> Self {
        let mut links = vec![Vec::new(); graph.len()];
        for jump in jumps {
            let from = graph.position(jump.from_cluster());
            let to = graph.position(jump.to_cluster());
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };
            if let Some(targets) = links.get_mut(from) {
                targets.push(to);
            }
            if let Some(targets) = links.get_mut(to) {
                targets.push(from);
            }
        }
        Self { graph, links }
    }

    /// Sums the decaying weights of every simple path leaving `cluster`.
    pub(crate) fn score(&self, cluster: usize) -> f64 {
        let mut available = vec![true; self.graph.len()];
        if let Some(slot) = available.get_mut(cluster) {
            *slot = false;
        }

        let mut total = 0.0;
        let mut stack = vec![(cluster, available, 1.0)];
        while let Some((current, open, weight)) = stack.pop() {
            for &next in self.links.get(current).map_or(&[][..], Vec::as_slice) {
                if !open.get(next).copied().unwrap_or(false) {
                    continue;
                }
                total += weight;
                let mut remaining = open.clone();
                if let Some(slot) = remaining.get_mut(next) {
                    *slot = false;
                }
                stack.push((next, remaining, weight * HOP_DECAY));
            }
        }
        total
    }

    /// Picks the most isolated cluster among those with at least one jump.
    ///
    /// Equal scores prefer the cluster with more unconnected sections at one
    /// of its ends, then the earliest cluster. A cluster without jumps never
    /// starts a multi-cluster tree, so a disconnected rupture reports the
    /// clusters cut off from the connected part.
    pub(crate) fn choose_start(&self) -> usize {
        let mut best: Option<(usize, f64, usize)> = None;
        for cluster in 0..self.graph.len() {
            if self.links.get(cluster).is_none_or(Vec::is_empty) {
                continue;
            }
            let score = self.score(cluster);
            let isolated = self.graph.isolated_end_sections(cluster);
            let better = match best {
                None => true,
                Some((_, best_score, best_isolated)) => {
                    score < best_score - SCORE_TOLERANCE
                        || (score <= best_score + SCORE_TOLERANCE && isolated > best_isolated)
                }
            };
            if better {
                best = Some((cluster, score, isolated));
            }
        }

        let (start, score, isolated) = best.unwrap_or((0, 0.0, 0));
        if let Some(cluster) = self.graph.clusters().get(start) {
            debug!(start = %cluster, score, isolated, "start cluster chosen");
        }
        start
    }
}
