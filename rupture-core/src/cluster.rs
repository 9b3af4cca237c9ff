//! Partitioning of a rupture's sections into contiguous same-fault clusters.
//!
//! A cluster is a maximal run of consecutive section ids on one parent
//! fault. Two runs on the same parent separated by a gap are distinct
//! clusters and are never merged.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    sync::Arc,
};

use crate::{
    Result,
    error::RuptureError,
    section::{FaultSection, ParentId, SectionId},
};

/// An ordered, non-empty run of contiguous sections sharing one parent fault.
///
/// Clusters are immutable once built and are shared between jumps and
/// rupture trees through [`Arc`]. A cluster is traversed in ascending id order
/// unless it was [`reversed`](Self::reversed); orientation changes the
/// section order but never the cluster's [`key`](Self::key).
///
/// # Examples
/// ```
/// use rupture_core::{FaultSection, SectionId, clusterize};
///
/// let clusters = clusterize(&[
///     FaultSection::new(3, 1),
///     FaultSection::new(2, 1),
/// ])?;
/// let cluster = &clusters[0];
/// assert_eq!(cluster.first(), SectionId::new(2));
/// assert_eq!(cluster.last(), SectionId::new(3));
/// assert_eq!(cluster.to_string(), "[1:2-3]");
///
/// let reversed = cluster.reversed();
/// assert_eq!(reversed.first(), SectionId::new(3));
/// assert_eq!(reversed.key(), cluster.key());
/// assert_eq!(reversed.to_string(), "[1:3-2]");
/// # Ok::<(), rupture_core::RuptureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaultCluster {
    parent: ParentId,
    key: SectionId,
    first: SectionId,
    last: SectionId,
    sections: Vec<FaultSection>,
    reversed: bool,
}

impl FaultCluster {
    /// Builds a cluster from a run of ascending, contiguous sections.
    ///
    /// Returns `None` for an empty run.
    fn from_run(parent: ParentId, sections: Vec<FaultSection>) -> Option<Self> {
        let first = sections.first()?.id();
        let last = sections.last()?.id();
        Some(Self {
            parent,
            key: first,
            first,
            last,
            sections,
            reversed: false,
        })
    }

    /// Returns the same cluster traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut sections = self.sections.clone();
        sections.reverse();
        Self {
            parent: self.parent,
            key: self.key,
            first: self.last,
            last: self.first,
            sections,
            reversed: !self.reversed,
        }
    }

    /// Returns `true` when the cluster is traversed in descending id order.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_reversed(&self) -> bool { self.reversed }

    /// Returns the parent fault shared by every section of the cluster.
    #[rustfmt::skip]
    #[must_use]
    pub const fn parent(&self) -> ParentId { self.parent }

    /// Returns the sections in traversal order.
    #[rustfmt::skip]
    #[must_use]
    pub fn sections(&self) -> &[FaultSection] { &self.sections }

    /// Iterates over the section ids in traversal order.
    pub fn section_ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.iter().map(FaultSection::id)
    }

    /// Returns the section the cluster is entered at.
    #[rustfmt::skip]
    #[must_use]
    pub const fn first(&self) -> SectionId { self.first }

    /// Returns the section the cluster is left at.
    #[rustfmt::skip]
    #[must_use]
    pub const fn last(&self) -> SectionId { self.last }

    /// Identifies the cluster within its rupture.
    ///
    /// This is the lowest section id, whatever the orientation. Section ids
    /// are unique per rupture, so it is enough to tell clusters apart.
    #[rustfmt::skip]
    #[must_use]
    pub const fn key(&self) -> SectionId { self.key }

    /// Returns `true` when `other` covers the same run, in either direction.
    #[must_use]
    pub fn is_same_run(&self, other: &Self) -> bool {
        self.key == other.key
            && self.parent == other.parent
            && self.sections.len() == other.sections.len()
    }

    /// Returns the number of sections in the cluster.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if `section` belongs to this cluster.
    #[must_use]
    pub fn contains(&self, section: SectionId) -> bool {
        self.position(section).is_some()
    }

    /// Returns the index of `section` in traversal order, if present.
    #[must_use]
    pub fn position(&self, section: SectionId) -> Option<usize> {
        if self.reversed {
            self.sections
                .binary_search_by(|entry| section.cmp(&entry.id()))
                .ok()
        } else {
            self.sections
                .binary_search_by_key(&section, FaultSection::id)
                .ok()
        }
    }
}

impl fmt::Display for FaultCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "[{}:{}]", self.parent, self.first)
        } else {
            write!(f, "[{}:{}-{}]", self.parent, self.first, self.last)
        }
    }
}

/// Splits a rupture's sections into contiguous same-fault clusters.
///
/// Sections are grouped by parent fault, sorted by id, and split wherever two
/// consecutive ids are not adjacent. The clusters come back ordered by their
/// first section id, so the result does not depend on the input order.
///
/// # Errors
/// Returns [`RuptureError::EmptyRupture`] when `sections` is empty and
/// [`RuptureError::DuplicateSection`] when a section id repeats.
///
/// # Examples
/// ```
/// use rupture_core::{FaultSection, clusterize};
///
/// // Same parent fault, but ids 6-8 are missing: two clusters.
/// let clusters = clusterize(&[FaultSection::new(5, 1), FaultSection::new(9, 1)])?;
/// assert_eq!(clusters.len(), 2);
/// # Ok::<(), rupture_core::RuptureError>(())
/// ```
pub fn clusterize(sections: &[FaultSection]) -> Result<Vec<Arc<FaultCluster>>> {
    if sections.is_empty() {
        return Err(RuptureError::EmptyRupture);
    }

    let mut seen = HashSet::with_capacity(sections.len());
    let mut by_parent: BTreeMap<ParentId, Vec<FaultSection>> = BTreeMap::new();
    for section in sections {
        if !seen.insert(section.id()) {
            return Err(RuptureError::DuplicateSection {
                section: section.id(),
            });
        }
        by_parent.entry(section.parent()).or_default().push(*section);
    }

    let mut clusters = Vec::new();
    for (parent, mut members) in by_parent {
        members.sort_unstable_by_key(FaultSection::id);
        let mut run: Vec<FaultSection> = Vec::new();
        for section in members {
            if run
                .last()
                .is_some_and(|previous| !previous.id().is_followed_by(section.id()))
            {
                clusters.extend(FaultCluster::from_run(parent, std::mem::take(&mut run)));
            }
            run.push(section);
        }
        clusters.extend(FaultCluster::from_run(parent, run));
    }

    clusters.sort_unstable_by_key(FaultCluster::key);
    Ok(clusters.into_iter().map(Arc::new).collect())
}
