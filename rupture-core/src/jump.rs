//! Jumps between clusters on distinct faults.

use std::{fmt, sync::Arc};

use crate::{cluster::FaultCluster, error::JumpError, section::SectionId};

/// A directed transition from a section of one cluster to a section of another.
///
/// A jump and its reverse describe the same physical connection; use
/// [`Jump::section_pair`] to compare them without regard to direction.
///
/// # Examples
/// ```
/// use rupture_core::{FaultSection, Jump, SectionId, clusterize};
///
/// let clusters = clusterize(&[FaultSection::new(1, 1), FaultSection::new(10, 2)])?;
/// let jump = Jump::new(
///     SectionId::new(1),
///     clusters[0].clone(),
///     SectionId::new(10),
///     clusters[1].clone(),
///     2.5,
/// )?;
/// assert_eq!(jump.reversed().section_pair(), jump.section_pair());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Jump {
    from_section: SectionId,
    from_cluster: Arc<FaultCluster>,
    to_section: SectionId,
    to_cluster: Arc<FaultCluster>,
    distance: f64,
}

impl Jump {
    /// Creates a jump after validating its endpoints and distance.
    ///
    /// # Errors
    /// Returns [`JumpError::SameCluster`] when both clusters are the same,
    /// [`JumpError::SectionOutsideCluster`] when a section is not a member of
    /// its cluster, and [`JumpError::InvalidDistance`] when `distance` is
    /// negative or not finite.
    pub fn new(
        from_section: SectionId,
        from_cluster: Arc<FaultCluster>,
        to_section: SectionId,
        to_cluster: Arc<FaultCluster>,
        distance: f64,
    ) -> Result<Self, JumpError> {
        if from_cluster.key() == to_cluster.key() {
            return Err(JumpError::SameCluster {
                from: from_section,
                to: to_section,
                cluster: from_cluster,
            });
        }
        if !from_cluster.contains(from_section) {
            return Err(JumpError::SectionOutsideCluster {
                section: from_section,
                cluster: from_cluster,
            });
        }
        if !to_cluster.contains(to_section) {
            return Err(JumpError::SectionOutsideCluster {
                section: to_section,
                cluster: to_cluster,
            });
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(JumpError::InvalidDistance {
                from: from_section,
                to: to_section,
                distance,
            });
        }
        Ok(Self {
            from_section,
            from_cluster,
            to_section,
            to_cluster,
            distance,
        })
    }

    /// Returns the departure section.
    #[rustfmt::skip]
    #[must_use]
    pub const fn from_section(&self) -> SectionId { self.from_section }

    /// Returns the departure cluster.
    #[rustfmt::skip]
    #[must_use]
    pub fn from_cluster(&self) -> &Arc<FaultCluster> { &self.from_cluster }

    /// Returns the arrival section.
    #[rustfmt::skip]
    #[must_use]
    pub const fn to_section(&self) -> SectionId { self.to_section }

    /// Returns the arrival cluster.
    #[rustfmt::skip]
    #[must_use]
    pub fn to_cluster(&self) -> &Arc<FaultCluster> { &self.to_cluster }

    /// Returns the jump distance.
    #[rustfmt::skip]
    #[must_use]
    pub const fn distance(&self) -> f64 { self.distance }

    /// Returns the same connection travelled in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from_section: self.to_section,
            from_cluster: Arc::clone(&self.to_cluster),
            to_section: self.from_section,
            to_cluster: Arc::clone(&self.from_cluster),
            distance: self.distance,
        }
    }

    /// Returns the direction-free section pair of this jump.
    #[must_use]
    pub fn section_pair(&self) -> SectionPair {
        SectionPair::new(self.from_section, self.to_section)
    }

    /// Swaps in differently oriented views of the same two clusters.
    pub(crate) fn with_clusters(&self, from: Arc<FaultCluster>, to: Arc<FaultCluster>) -> Self {
        Self {
            from_section: self.from_section,
            from_cluster: from,
            to_section: self.to_section,
            to_cluster: to,
            distance: self.distance,
        }
    }

    /// Orients the jump so that it departs from the lower section id.
    #[must_use]
    pub(crate) fn into_canonical(self) -> Self {
        if self.from_section <= self.to_section {
            self
        } else {
            self.reversed()
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] => [{}:{}] R={:.1}",
            self.from_cluster.parent(),
            self.from_section,
            self.to_cluster.parent(),
            self.to_section,
            self.distance
        )
    }
}

/// Unordered pair of section ids, stored with the lower id first.
///
/// # Examples
/// ```
/// use rupture_core::{SectionId, SectionPair};
///
/// let forward = SectionPair::new(SectionId::new(9), SectionId::new(2));
/// let backward = SectionPair::new(SectionId::new(2), SectionId::new(9));
/// assert_eq!(forward, backward);
/// assert_eq!(forward.low(), SectionId::new(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionPair {
    low: SectionId,
    high: SectionId,
}

impl SectionPair {
    /// Creates a pair, ordering the ids.
    #[must_use]
    pub fn new(a: SectionId, b: SectionId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Returns the lower id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn low(&self) -> SectionId { self.low }

    /// Returns the higher id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn high(&self) -> SectionId { self.high }
}

impl fmt::Display for SectionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}
