//! Pluggable policies deciding which section pairs may host a jump.

use std::sync::Arc;

use crate::{
    Result,
    cluster::FaultCluster,
    distance::DistanceProvider,
    error::{JumpError, RuptureError},
    jump::Jump,
};

/// Supplies the candidate jumps between two clusters of a rupture.
///
/// Every returned jump must depart from `from` and arrive on `to`. The search
/// asks once per unordered cluster pair and derives the reverse direction
/// itself.
pub trait ConnectionStrategy {
    /// Returns the plausible jumps from `from` to `to`, possibly none.
    ///
    /// # Errors
    /// Returns a [`JumpError`] when a jump cannot be constructed or a
    /// distance lookup fails.
    fn candidate_jumps(
        &self,
        from: &Arc<FaultCluster>,
        to: &Arc<FaultCluster>,
    ) -> core::result::Result<Vec<Jump>, JumpError>;
}

impl<S: ConnectionStrategy + ?Sized> ConnectionStrategy for &S {
    fn candidate_jumps(
        &self,
        from: &Arc<FaultCluster>,
        to: &Arc<FaultCluster>,
    ) -> core::result::Result<Vec<Jump>, JumpError> {
        (**self).candidate_jumps(from, to)
    }
}

impl<S: ConnectionStrategy + ?Sized> ConnectionStrategy for Arc<S> {
    fn candidate_jumps(
        &self,
        from: &Arc<FaultCluster>,
        to: &Arc<FaultCluster>,
    ) -> core::result::Result<Vec<Jump>, JumpError> {
        (**self).candidate_jumps(from, to)
    }
}

/// Connects two clusters through their closest section pair, provided that
/// pair lies within a maximum jump distance.
///
/// Ties between equally close pairs keep the pair with the lowest section ids.
///
/// # Examples
/// ```
/// use rupture_core::{
///     ClosestSectionStrategy, ConnectionStrategy, DistanceError, DistanceProvider,
///     FaultSection, SectionId, clusterize,
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
/// let strategy = ClosestSectionStrategy::new(AlongStrike).with_max_jump_distance(5.0)?;
/// let clusters = clusterize(&[
///     FaultSection::new(1, 1),
///     FaultSection::new(2, 1),
///     FaultSection::new(4, 2),
/// ])?;
/// let jumps = strategy.candidate_jumps(&clusters[0], &clusters[1])?;
/// assert_eq!(jumps.len(), 1);
/// assert_eq!(jumps[0].from_section(), SectionId::new(2));
/// assert_eq!(jumps[0].distance(), 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClosestSectionStrategy<P> {
    provider: P,
    max_jump_distance: f64,
}

impl<P: DistanceProvider> ClosestSectionStrategy<P> {
    /// Maximum jump distance applied when none is configured, in kilometres.
    pub const DEFAULT_MAX_JUMP_DISTANCE: f64 = 100.0;

    /// Creates a strategy using [`Self::DEFAULT_MAX_JUMP_DISTANCE`].
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            max_jump_distance: Self::DEFAULT_MAX_JUMP_DISTANCE,
        }
    }

    /// Overrides the maximum distance a jump may span.
    ///
    /// # Errors
    /// Returns [`RuptureError::InvalidMaxJumpDistance`] unless `max` is
    /// finite and positive.
    pub fn with_max_jump_distance(mut self, max: f64) -> Result<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(RuptureError::InvalidMaxJumpDistance { got: max });
        }
        self.max_jump_distance = max;
        Ok(self)
    }

    /// Returns the configured maximum jump distance.
    #[rustfmt::skip]
    pub const fn max_jump_distance(&self) -> f64 { self.max_jump_distance }

    /// Returns the wrapped distance provider.
    #[rustfmt::skip]
    pub const fn provider(&self) -> &P { &self.provider }
}

impl<P: DistanceProvider> ConnectionStrategy for ClosestSectionStrategy<P> {
    fn candidate_jumps(
        &self,
        from: &Arc<FaultCluster>,
        to: &Arc<FaultCluster>,
    ) -> core::result::Result<Vec<Jump>, JumpError> {
        let mut closest = None;
        for from_section in from.section_ids() {
            for to_section in to.section_ids() {
                let distance = self.provider.distance(from_section, to_section)?;
                if closest.is_none_or(|(_, _, best)| distance < best) {
                    closest = Some((from_section, to_section, distance));
                }
            }
        }
        match closest {
            Some((from_section, to_section, distance)) if distance <= self.max_jump_distance => {
                let jump = Jump::new(
                    from_section,
                    Arc::clone(from),
                    to_section,
                    Arc::clone(to),
                    distance,
                )?;
                Ok(vec![jump])
            }
            _ => Ok(Vec::new()),
        }
    }
}
