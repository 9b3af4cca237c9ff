//! Parent and child lookups over a [`ClusterRupture`].

use std::{collections::HashMap, sync::Arc};

use crate::{cluster::FaultCluster, jump::Jump, section::SectionId};

use super::ClusterRupture;

#[derive(Debug, Clone)]
struct Node {
    cluster: Arc<FaultCluster>,
    parent: Option<SectionId>,
    incoming: Option<Jump>,
    children: Vec<SectionId>,
}

/// Index over a rupture tree keyed by cluster.
///
/// Within a strand each cluster's parent is its predecessor; the first
/// cluster of a splay has the branching cluster as its parent.
///
/// # Examples
/// ```
/// use rupture_core::{ConnectionSearchBuilder, FaultSection};
/// # use rupture_core::{ConnectionStrategy, FaultCluster, Jump, JumpError};
/// # use std::sync::Arc;
/// # struct Adjacent;
/// # impl ConnectionStrategy for Adjacent {
/// #     fn candidate_jumps(
/// #         &self,
/// #         from: &Arc<FaultCluster>,
/// #         to: &Arc<FaultCluster>,
/// #     ) -> Result<Vec<Jump>, JumpError> {
/// #         if to.first().get().abs_diff(from.last().get()) > 1 {
/// #             return Ok(Vec::new());
/// #         }
/// #         Ok(vec![Jump::new(from.last(), from.clone(), to.first(), to.clone(), 1.0)?])
/// #     }
/// # }
///
/// let search = ConnectionSearchBuilder::new().build(Adjacent)?;
/// let rupture = search.build_rupture(&[
///     FaultSection::new(1, 1),
///     FaultSection::new(2, 2),
///     FaultSection::new(3, 3),
/// ])?;
/// let navigator = rupture.navigator();
/// let first = &rupture.trunk()[0];
/// assert!(navigator.parent(first).is_none());
/// assert_eq!(navigator.descendants(first).len(), 2);
/// # Ok::<(), rupture_core::RuptureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuptureNavigator {
    root: Option<SectionId>,
    nodes: HashMap<SectionId, Node>,
}

impl RuptureNavigator {
    pub(crate) fn new(rupture: &ClusterRupture) -> Self {
        let mut nodes: HashMap<SectionId, Node> = HashMap::with_capacity(rupture.cluster_count());
        let mut stack: Vec<(&ClusterRupture, Option<&Jump>)> = vec![(rupture, None)];

        while let Some((strand, link)) = stack.pop() {
            let incoming = std::iter::once(link).chain(strand.trunk_jumps().iter().map(Some));
            let mut previous: Option<SectionId> = link.map(|jump| jump.from_cluster().key());
            for (cluster, jump) in strand.trunk().iter().zip(incoming) {
                let key = cluster.key();
                if let Some(parent) = previous.and_then(|parent| nodes.get_mut(&parent)) {
                    parent.children.push(key);
                }
                nodes.insert(
                    key,
                    Node {
                        cluster: Arc::clone(cluster),
                        parent: previous,
                        incoming: jump.cloned(),
                        children: Vec::new(),
                    },
                );
                previous = Some(key);
            }
            stack.extend(
                strand
                    .splays()
                    .iter()
                    .rev()
                    .map(|splay| (splay.rupture(), Some(splay.jump()))),
            );
        }

        Self {
            root: rupture.start().map(|cluster| cluster.key()),
            nodes,
        }
    }

    fn node(&self, cluster: &FaultCluster) -> Option<&Node> {
        self.nodes.get(&cluster.key())
    }

    /// Returns the cluster the tree starts from.
    #[must_use]
    pub fn root(&self) -> Option<&Arc<FaultCluster>> {
        self.root
            .and_then(|key| self.nodes.get(&key))
            .map(|node| &node.cluster)
    }

    /// Returns `true` when `cluster` is part of the tree.
    #[must_use]
    pub fn contains(&self, cluster: &FaultCluster) -> bool {
        self.node(cluster)
            .is_some_and(|node| node.cluster.is_same_run(cluster))
    }

    /// Returns the cluster `cluster` was reached from.
    #[must_use]
    pub fn parent(&self, cluster: &FaultCluster) -> Option<&Arc<FaultCluster>> {
        let parent = self.node(cluster)?.parent?;
        self.nodes.get(&parent).map(|node| &node.cluster)
    }

    /// Returns the clusters reached directly from `cluster`: its strand
    /// successor first, then the first cluster of each splay leaving it.
    #[must_use]
    pub fn children(&self, cluster: &FaultCluster) -> Vec<&Arc<FaultCluster>> {
        self.node(cluster)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|child| self.nodes.get(child))
                    .map(|child| &child.cluster)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns every cluster reachable below `cluster`, depth first.
    #[must_use]
    pub fn descendants(&self, cluster: &FaultCluster) -> Vec<&Arc<FaultCluster>> {
        let mut found = Vec::new();
        let mut stack: Vec<SectionId> = self
            .node(cluster)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(&key) else {
                continue;
            };
            found.push(&node.cluster);
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    /// Returns the jump that reached `cluster`, or `None` for the root.
    #[must_use]
    pub fn jump_to(&self, cluster: &FaultCluster) -> Option<&Jump> {
        self.node(cluster)?.incoming.as_ref()
    }

    /// Returns the tree jump linking two adjacent clusters, oriented from
    /// `from` to `to`.
    #[must_use]
    pub fn jump_between(&self, from: &FaultCluster, to: &FaultCluster) -> Option<Jump> {
        let is_parent = |child: &FaultCluster, parent: &FaultCluster| {
            self.node(child)
                .and_then(|node| node.parent)
                .is_some_and(|key| key == parent.key())
        };
        if is_parent(to, from) {
            self.jump_to(to).cloned()
        } else if is_parent(from, to) {
            self.jump_to(from).map(Jump::reversed)
        } else {
            None
        }
    }
}
