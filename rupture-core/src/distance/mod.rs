//! Section-to-section distance lookups.
//!
//! The geometry behind these distances lives outside this crate. Callers
//! inject a [`DistanceProvider`], typically wrapped in [`CachedDistances`] so
//! that many ruptures processed concurrently share one memo.

mod cache;

use std::sync::Arc;

use crate::{error::DistanceError, section::SectionId};

pub use self::cache::CachedDistances;

/// Source of minimum surface distances between two fault sections.
///
/// Implementations must be symmetric: `distance(a, b) == distance(b, a)`.
///
/// # Examples
/// ```
/// use rupture_core::{DistanceError, DistanceProvider, SectionId};
///
/// struct AlongStrike;
///
/// impl DistanceProvider for AlongStrike {
///     fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
///         Ok(f64::from(left.get().abs_diff(right.get())))
///     }
/// }
///
/// assert_eq!(AlongStrike.distance(SectionId::new(2), SectionId::new(7))?, 5.0);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceProvider {
    /// Returns the distance between two sections.
    ///
    /// # Errors
    /// Returns [`DistanceError::UnknownSection`] when either section has no
    /// geometry and [`DistanceError::NonFinite`] when the distance cannot be
    /// represented.
    fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError>;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for &P {
    fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
        (**self).distance(left, right)
    }
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for Arc<P> {
    fn distance(&self, left: SectionId, right: SectionId) -> Result<f64, DistanceError> {
        (**self).distance(left, right)
    }
}
