//! Candidate-jump graph over the clusters of one rupture.
//!
//! Nodes are indices into the canonical cluster list. Each connected cluster
//! pair is represented by a single jump, the shortest one the strategy
//! offered, stored once per direction.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    Result,
    cluster::FaultCluster,
    error::{AMBIGUOUS_JUMP_WARNING, JumpError},
    jump::{Jump, SectionPair},
    section::SectionId,
    strategy::ConnectionStrategy,
};

/// Directed adjacency entry: the representative jump from one cluster to
/// `target`.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
    target: usize,
    jump: Jump,
}

impl Edge {
    #[rustfmt::skip]
    pub(crate) const fn target(&self) -> usize { self.target }

    #[rustfmt::skip]
    pub(crate) const fn jump(&self) -> &Jump { &self.jump }

    #[rustfmt::skip]
    pub(crate) const fn distance(&self) -> f64 { self.jump.distance() }
}

/// Clusters of a rupture together with the jumps the strategy allows between
/// them.
#[derive(Clone, Debug)]
pub(crate) struct ConnectionGraph {
    clusters: Vec<Arc<FaultCluster>>,
    adjacency: Vec<Vec<Edge>>,
    connected_sections: HashSet<SectionId>,
}

impl ConnectionGraph {
    /// Asks `strategy` for candidate jumps between every cluster pair.
    ///
    /// The strategy is consulted once per unordered pair, earlier cluster
    /// first; the opposite direction reuses the reversed jump.
    pub(crate) fn build<S>(clusters: Vec<Arc<FaultCluster>>, strategy: &S) -> Result<Self>
    where
        S: ConnectionStrategy + ?Sized,
    {
        let mut adjacency = vec![Vec::new(); clusters.len()];
        let mut connected_sections = HashSet::new();

        for (i, from) in clusters.iter().enumerate() {
            for (j, to) in clusters.iter().enumerate().skip(i + 1) {
                let candidates = strategy.candidate_jumps(from, to)?;
                let mut by_pair: BTreeMap<SectionPair, Jump> = BTreeMap::new();
                for candidate in candidates {
                    let jump = orient(candidate, from, to)?;
                    connected_sections.insert(jump.from_section());
                    connected_sections.insert(jump.to_section());
                    keep_shortest(&mut by_pair, jump);
                }
                let Some(representative) = by_pair.into_values().min_by(compare_jumps) else {
                    continue;
                };
                if let Some(edges) = adjacency.get_mut(j) {
                    edges.push(Edge {
                        target: i,
                        jump: representative.reversed(),
                    });
                }
                if let Some(edges) = adjacency.get_mut(i) {
                    edges.push(Edge {
                        target: j,
                        jump: representative,
                    });
                }
            }
        }

        for edges in &mut adjacency {
            edges.sort_by(|a, b| {
                a.distance()
                    .total_cmp(&b.distance())
                    .then(a.target.cmp(&b.target))
            });
        }

        let graph = Self {
            clusters,
            adjacency,
            connected_sections,
        };
        debug!(
            clusters = graph.len(),
            edges = graph.edge_count(),
            "connection graph assembled"
        );
        Ok(graph)
    }

    #[rustfmt::skip]
    pub(crate) fn clusters(&self) -> &[Arc<FaultCluster>] { &self.clusters }

    #[rustfmt::skip]
    pub(crate) fn len(&self) -> usize { self.clusters.len() }

    /// Outgoing edges of `cluster`, nearest first.
    pub(crate) fn neighbors(&self, cluster: usize) -> &[Edge] {
        self.adjacency.get(cluster).map_or(&[], Vec::as_slice)
    }

    /// Number of undirected cluster connections.
    pub(crate) fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Index of `cluster` in canonical order.
    pub(crate) fn position(&self, cluster: &FaultCluster) -> Option<usize> {
        self.clusters
            .binary_search_by_key(&cluster.key(), |candidate| candidate.key())
            .ok()
    }

    /// Index of the cluster holding `section`.
    pub(crate) fn cluster_of(&self, section: SectionId) -> Option<usize> {
        self.clusters
            .iter()
            .position(|cluster| cluster.contains(section))
    }

    /// Counts the sections at either end of a cluster that no candidate jump
    /// touches and returns the larger run.
    pub(crate) fn isolated_end_sections(&self, cluster: usize) -> usize {
        let Some(cluster) = self.clusters.get(cluster) else {
            return 0;
        };
        let isolated = |id: &SectionId| !self.connected_sections.contains(id);
        let leading = cluster.section_ids().take_while(isolated).count();
        let trailing = cluster
            .sections()
            .iter()
            .rev()
            .map(|section| section.id())
            .take_while(isolated)
            .count();
        leading.max(trailing)
    }
}

/// Points `jump` from `from` to `to`, reversing it if the strategy handed it
/// back the other way round.
fn orient(
    jump: Jump,
    from: &Arc<FaultCluster>,
    to: &Arc<FaultCluster>,
) -> core::result::Result<Jump, JumpError> {
    if from.contains(jump.from_section()) && to.contains(jump.to_section()) {
        Ok(jump)
    } else if to.contains(jump.from_section()) && from.contains(jump.to_section()) {
        Ok(jump.reversed())
    } else if from.contains(jump.from_section()) {
        Err(JumpError::SectionOutsideCluster {
            section: jump.to_section(),
            cluster: Arc::clone(to),
        })
    } else {
        Err(JumpError::SectionOutsideCluster {
            section: jump.from_section(),
            cluster: Arc::clone(from),
        })
    }
}

fn keep_shortest(by_pair: &mut BTreeMap<SectionPair, Jump>, jump: Jump) {
    let pair = jump.section_pair();
    let Some(existing) = by_pair.get(&pair) else {
        by_pair.insert(pair, jump);
        return;
    };
    if existing.distance() == jump.distance() {
        return;
    }
    let (kept, discarded) = if jump.distance() < existing.distance() {
        (jump.distance(), existing.distance())
    } else {
        (existing.distance(), jump.distance())
    };
    warn!(
        code = AMBIGUOUS_JUMP_WARNING,
        sections = %pair,
        kept,
        discarded,
        "strategy reported one section pair with differing distances"
    );
    if jump.distance() < existing.distance() {
        by_pair.insert(pair, jump);
    }
}

fn compare_jumps(a: &Jump, b: &Jump) -> Ordering {
    a.distance()
        .total_cmp(&b.distance())
        .then(a.from_section().cmp(&b.from_section()))
        .then(a.to_section().cmp(&b.to_section()))
}
