//! Spanning-tree construction from a canonical jump set.
//!
//! Strands are planned with an explicit work stack over cluster indices and
//! only then assembled, deepest splays first, into immutable
//! [`ClusterRupture`] values.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Result,
    cluster::FaultCluster,
    error::RuptureError,
    graph::ConnectionGraph,
    jump::Jump,
    rupture::{ClusterRupture, Splay},
};

/// One strand as cluster indices, before assembly.
#[derive(Debug, Default)]
struct StrandPlan {
    clusters: Vec<usize>,
    jumps: Vec<Jump>,
    splays: Vec<(Jump, usize)>,
}

/// Grows a [`ClusterRupture`] over every cluster of a connection graph.
#[derive(Debug)]
pub(crate) struct RuptureTreeBuilder<'g> {
    graph: &'g ConnectionGraph,
    links: Vec<Vec<(usize, Jump)>>,
}

impl<'g> RuptureTreeBuilder<'g> {
    /// Indexes `jumps` in both directions, nearest target first.
    pub(crate) fn new(graph: &'g ConnectionGraph, jumps: &[Jump]) -> Self {
        let mut links: Vec<Vec<(usize, Jump)>> = vec![Vec::new(); graph.len()];
        for jump in jumps {
            let (Some(from), Some(to)) = (
                graph.position(jump.from_cluster()),
                graph.position(jump.to_cluster()),
            ) else {
                continue;
            };
            if let Some(outgoing) = links.get_mut(from) {
                outgoing.push((to, jump.clone()));
            }
            if let Some(outgoing) = links.get_mut(to) {
                outgoing.push((from, jump.reversed()));
            }
        }
        for outgoing in &mut links {
            outgoing.sort_by(|(a, a_jump), (b, b_jump)| {
                a_jump
                    .distance()
                    .total_cmp(&b_jump.distance())
                    .then(a.cmp(b))
            });
        }
        Self { graph, links }
    }

    /// Builds the tree rooted at cluster `start`.
    ///
    /// # Errors
    /// Returns [`RuptureError::DisconnectedRupture`] when some cluster cannot
    /// be reached from `start`.
    pub(crate) fn build(&self, start: usize) -> Result<ClusterRupture> {
        let root = self
            .graph
            .clusters()
            .get(start)
            .ok_or(RuptureError::EmptyRupture)?;

        let mut placement = Placement::new(self.graph.len());
        placement.place(start, self.leaves_from_start(start));
        let mut plans = vec![StrandPlan::default()];
        let mut pending = vec![(0, start)];
        while let Some((index, first)) = pending.pop() {
            let (plan, children) = self.grow(first, &mut placement, &mut plans);
            if let Some(slot) = plans.get_mut(index) {
                *slot = plan;
            }
            pending.extend(children.into_iter().rev());
        }

        let unreached: Vec<_> = placement
            .used
            .iter()
            .zip(self.graph.clusters())
            .filter(|(placed, _)| !**placed)
            .map(|(_, cluster)| Arc::clone(cluster))
            .collect();
        if !unreached.is_empty() {
            return Err(RuptureError::DisconnectedRupture {
                start: Arc::clone(root),
                unreached,
            });
        }

        let views = self.oriented_views(&placement.reversed);
        let rupture = self.assemble(plans, &views)?;
        debug!(
            start = %root,
            clusters = rupture.cluster_count(),
            splays = rupture.splay_count(),
            reversed = placement.reversed.iter().filter(|flag| **flag).count(),
            "rupture tree assembled"
        );
        Ok(rupture)
    }

    /// Returns `true` when the start cluster should be traversed backwards:
    /// its jumps leave closer to its first section than to its last, so the
    /// rupture reads towards them.
    fn leaves_from_start(&self, start: usize) -> bool {
        let (Some(cluster), Some(outgoing)) =
            (self.graph.clusters().get(start), self.links.get(start))
        else {
            return false;
        };
        let positions = outgoing
            .iter()
            .filter_map(|(_, jump)| cluster.position(jump.from_section()));
        let (Some(lowest), Some(highest)) = (positions.clone().min(), positions.max()) else {
            return false;
        };
        lowest < cluster.section_count() - (highest + 1)
    }

    /// Returns `true` when a jump enters `target` nearer its last section
    /// than its first.
    fn enters_near_end(&self, target: usize, jump: &Jump) -> bool {
        self.graph
            .clusters()
            .get(target)
            .and_then(|cluster| {
                let index = cluster.position(jump.to_section())?;
                Some(index > cluster.section_count() - (index + 1))
            })
            .unwrap_or(false)
    }

    /// Extends a strand from `first` until its tail has no unused target.
    ///
    /// Each tail's nearest unused target continues the strand. Its other
    /// unused targets are reserved immediately and returned as pending
    /// splays, to be grown once this strand is complete.
    fn grow(
        &self,
        first: usize,
        placement: &mut Placement,
        plans: &mut Vec<StrandPlan>,
    ) -> (StrandPlan, Vec<(usize, usize)>) {
        let mut plan = StrandPlan {
            clusters: vec![first],
            ..StrandPlan::default()
        };
        let mut children = Vec::new();
        let mut tail = first;
        loop {
            let mut next = None;
            for (target, jump) in self.links.get(tail).map_or(&[][..], Vec::as_slice) {
                if placement.is_used(*target) {
                    continue;
                }
                placement.place(*target, self.enters_near_end(*target, jump));
                if next.is_none() {
                    next = Some((*target, jump.clone()));
                } else {
                    let child = plans.len();
                    plans.push(StrandPlan::default());
                    plan.splays.push((jump.clone(), child));
                    children.push((child, *target));
                }
            }
            let Some((target, jump)) = next else {
                break;
            };
            plan.clusters.push(target);
            plan.jumps.push(jump);
            tail = target;
        }
        (plan, children)
    }

    /// Each cluster as it is traversed in the tree.
    fn oriented_views(&self, reversed: &[bool]) -> Vec<Arc<FaultCluster>> {
        self.graph
            .clusters()
            .iter()
            .zip(reversed)
            .map(|(cluster, &flip)| {
                if flip {
                    Arc::new(cluster.reversed())
                } else {
                    Arc::clone(cluster)
                }
            })
            .collect()
    }

    /// Rebinds `jump` to the oriented views of its clusters.
    fn orient(&self, jump: &Jump, views: &[Arc<FaultCluster>]) -> Jump {
        let view = |cluster: &Arc<FaultCluster>| {
            self.graph
                .position(cluster)
                .and_then(|index| views.get(index))
                .map_or_else(|| Arc::clone(cluster), Arc::clone)
        };
        jump.with_clusters(view(jump.from_cluster()), view(jump.to_cluster()))
    }

    /// Turns plans into ruptures. Children always sit after their parent in
    /// `plans`, so walking backwards finds every splay already built.
    fn assemble(
        &self,
        plans: Vec<StrandPlan>,
        views: &[Arc<FaultCluster>],
    ) -> Result<ClusterRupture> {
        let mut built: Vec<Option<ClusterRupture>> = Vec::with_capacity(plans.len());
        built.resize_with(plans.len(), || None);

        for (index, plan) in plans.into_iter().enumerate().rev() {
            let trunk = plan
                .clusters
                .iter()
                .filter_map(|&cluster| views.get(cluster).cloned())
                .collect();
            let jumps = plan
                .jumps
                .iter()
                .map(|jump| self.orient(jump, views))
                .collect();
            let splays = plan
                .splays
                .into_iter()
                .filter_map(|(jump, child)| {
                    built
                        .get_mut(child)
                        .and_then(Option::take)
                        .map(|rupture| Splay::new(self.orient(&jump, views), rupture))
                })
                .collect();
            if let Some(slot) = built.get_mut(index) {
                *slot = Some(ClusterRupture::from_parts(trunk, jumps, splays));
            }
        }

        built
            .into_iter()
            .next()
            .flatten()
            .ok_or(RuptureError::EmptyRupture)
    }
}

/// Which clusters are already in the tree, and in which direction.
#[derive(Debug)]
struct Placement {
    used: Vec<bool>,
    reversed: Vec<bool>,
}

impl Placement {
    fn new(clusters: usize) -> Self {
        Self {
            used: vec![false; clusters],
            reversed: vec![false; clusters],
        }
    }

    fn is_used(&self, cluster: usize) -> bool {
        self.used.get(cluster).copied().unwrap_or(true)
    }

    fn place(&mut self, cluster: usize, reversed: bool) {
        if let Some(slot) = self.used.get_mut(cluster) {
            *slot = true;
        }
        if let Some(slot) = self.reversed.get_mut(cluster) {
            *slot = reversed;
        }
    }
}
