//! The canonical tree form of a multi-fault rupture.
//!
//! A [`ClusterRupture`] is a primary strand of clusters (the trunk) joined by
//! jumps, plus splays: child ruptures branching off a section of a trunk
//! cluster. Splays are ruptures in their own right and may branch again.

mod navigator;

use std::{fmt, sync::Arc};

use crate::{cluster::FaultCluster, jump::Jump, section::SectionId};

pub use self::navigator::RuptureNavigator;

/// The section of a cluster at which a splay leaves its parent strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchPoint {
    cluster: Arc<FaultCluster>,
    section: SectionId,
}

impl BranchPoint {
    /// Creates a branch point at `section` of `cluster`.
    #[must_use]
    pub const fn new(cluster: Arc<FaultCluster>, section: SectionId) -> Self {
        Self { cluster, section }
    }

    /// Returns the parent-strand cluster the splay leaves from.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cluster(&self) -> &Arc<FaultCluster> { &self.cluster }

    /// Returns the departure section.
    #[rustfmt::skip]
    #[must_use]
    pub const fn section(&self) -> SectionId { self.section }
}

impl fmt::Display for BranchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.cluster.parent(), self.section)
    }
}

/// A child rupture attached to a strand through a jump.
#[derive(Debug, Clone, PartialEq)]
pub struct Splay {
    branch: BranchPoint,
    jump: Jump,
    rupture: ClusterRupture,
}

impl Splay {
    pub(crate) fn new(jump: Jump, rupture: ClusterRupture) -> Self {
        Self {
            branch: BranchPoint::new(Arc::clone(jump.from_cluster()), jump.from_section()),
            jump,
            rupture,
        }
    }

    /// Returns where the splay leaves its parent strand.
    #[rustfmt::skip]
    #[must_use]
    pub const fn branch(&self) -> &BranchPoint { &self.branch }

    /// Returns the jump from the branch point onto the splay's first cluster.
    #[rustfmt::skip]
    #[must_use]
    pub const fn jump(&self) -> &Jump { &self.jump }

    /// Returns the child rupture.
    #[rustfmt::skip]
    #[must_use]
    pub const fn rupture(&self) -> &ClusterRupture { &self.rupture }
}

/// Immutable tree of clusters spanning one rupture.
///
/// Every cluster appears exactly once across the trunk and all splays, and a
/// tree over `K` clusters always holds `K - 1` jumps.
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
/// #         Ok(vec![Jump::new(from.last(), from.clone(), to.first(), to.clone(), 1.0)?])
/// #     }
/// # }
///
/// let search = ConnectionSearchBuilder::new().build(Adjacent)?;
/// let rupture = search.build_rupture(&[
///     FaultSection::new(1, 1),
///     FaultSection::new(2, 1),
///     FaultSection::new(3, 2),
/// ])?;
/// assert_eq!(rupture.cluster_count(), 2);
/// assert_eq!(rupture.jump_count(), 1);
/// assert!(rupture.is_single_strand());
/// # Ok::<(), rupture_core::RuptureError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRupture {
    trunk: Vec<Arc<FaultCluster>>,
    trunk_jumps: Vec<Jump>,
    splays: Vec<Splay>,
    cluster_count: usize,
    section_count: usize,
    splay_count: usize,
    single_strand: bool,
}

impl ClusterRupture {
    /// Assembles a rupture from an already linked strand and its splays.
    pub(crate) fn from_parts(
        trunk: Vec<Arc<FaultCluster>>,
        trunk_jumps: Vec<Jump>,
        splays: Vec<Splay>,
    ) -> Self {
        let cluster_count = trunk.len()
            + splays
                .iter()
                .map(|splay| splay.rupture.cluster_count)
                .sum::<usize>();
        let section_count = trunk.iter().map(|cluster| cluster.section_count()).sum::<usize>()
            + splays
                .iter()
                .map(|splay| splay.rupture.section_count)
                .sum::<usize>();
        let splay_count = splays.len()
            + splays
                .iter()
                .map(|splay| splay.rupture.splay_count)
                .sum::<usize>();
        let single_strand = splays.is_empty()
            && trunk_jumps.len() + 1 == trunk.len()
            && trunk
                .windows(2)
                .zip(&trunk_jumps)
                .all(|(pair, jump)| match pair {
                    [from, to] => {
                        jump.from_section() == from.last() && jump.to_section() == to.first()
                    }
                    _ => false,
                });
        Self {
            trunk,
            trunk_jumps,
            splays,
            cluster_count,
            section_count,
            splay_count,
            single_strand,
        }
    }

    /// Returns the clusters of the primary strand in order.
    #[rustfmt::skip]
    #[must_use]
    pub fn trunk(&self) -> &[Arc<FaultCluster>] { &self.trunk }

    /// Returns the jumps linking consecutive trunk clusters.
    #[rustfmt::skip]
    #[must_use]
    pub fn trunk_jumps(&self) -> &[Jump] { &self.trunk_jumps }

    /// Returns the splays attached directly to this strand.
    #[rustfmt::skip]
    #[must_use]
    pub fn splays(&self) -> &[Splay] { &self.splays }

    /// Returns the cluster the rupture starts from.
    #[must_use]
    pub fn start(&self) -> Option<&Arc<FaultCluster>> {
        self.trunk.first()
    }

    /// Iterates over the splays leaving this strand at `branch`.
    pub fn splays_from<'a>(&'a self, branch: &'a BranchPoint) -> impl Iterator<Item = &'a Splay> {
        self.splays
            .iter()
            .filter(move |splay| &splay.branch == branch)
    }

    /// Returns the number of clusters in the whole tree.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cluster_count(&self) -> usize { self.cluster_count }

    /// Returns the number of jumps in the whole tree.
    #[must_use]
    pub const fn jump_count(&self) -> usize {
        self.cluster_count.saturating_sub(1)
    }

    /// Returns the number of splays in the whole tree, nested ones included.
    #[rustfmt::skip]
    #[must_use]
    pub const fn splay_count(&self) -> usize { self.splay_count }

    /// Returns the number of sections in the whole tree.
    #[rustfmt::skip]
    #[must_use]
    pub const fn section_count(&self) -> usize { self.section_count }

    /// Returns `true` when the tree is one unbranched strand in which every
    /// jump leaves the last section of a cluster and enters the first
    /// section of the next.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_single_strand(&self) -> bool { self.single_strand }

    /// Returns this strand followed by every nested splay strand, depth first.
    #[must_use]
    pub fn strands(&self) -> Vec<&Self> {
        let mut strands = Vec::new();
        let mut stack = vec![self];
        while let Some(strand) = stack.pop() {
            strands.push(strand);
            stack.extend(strand.splays.iter().rev().map(|splay| &splay.rupture));
        }
        strands
    }

    /// Iterates over every jump in the tree, strand by strand.
    pub fn jumps(&self) -> impl Iterator<Item = &Jump> + '_ {
        self.strands().into_iter().flat_map(|strand| {
            strand
                .trunk_jumps
                .iter()
                .chain(strand.splays.iter().map(|splay| &splay.jump))
        })
    }

    /// Iterates over every cluster in the tree, strand by strand.
    pub fn clusters(&self) -> impl Iterator<Item = &Arc<FaultCluster>> + '_ {
        self.strands()
            .into_iter()
            .flat_map(|strand| strand.trunk.iter())
    }

    /// Returns `true` if `section` belongs to any cluster of the tree.
    #[must_use]
    pub fn contains_section(&self, section: SectionId) -> bool {
        self.clusters().any(|cluster| cluster.contains(section))
    }

    /// Lists every section of the tree.
    ///
    /// Trunk clusters are emitted in order; a splay follows immediately after
    /// the section it branches from.
    #[must_use]
    pub fn ordered_sections(&self) -> Vec<SectionId> {
        let mut ordered = Vec::with_capacity(self.section_count);
        self.push_sections(&mut ordered);
        ordered
    }

    fn push_sections(&self, ordered: &mut Vec<SectionId>) {
        for cluster in &self.trunk {
            for section in cluster.section_ids() {
                ordered.push(section);
                for splay in &self.splays {
                    if splay.branch.section == section && splay.branch.cluster == *cluster {
                        splay.rupture.push_sections(ordered);
                    }
                }
            }
        }
    }

    /// Builds an index for parent and child lookups across the tree.
    #[must_use]
    pub fn navigator(&self) -> RuptureNavigator {
        RuptureNavigator::new(self)
    }
}

impl fmt::Display for ClusterRupture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, cluster) in self.trunk.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cluster}")?;
        }
        for splay in &self.splays {
            let nested = splay.rupture.to_string().replace('\n', "\n\t");
            write!(f, "\n\t--splay from {}: {nested}", splay.branch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
