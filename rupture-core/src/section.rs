//! Identifiers for fault subsections and their parent faults.

use std::fmt;

/// Globally unique identifier of a fault subsection.
///
/// # Examples
/// ```
/// use rupture_core::SectionId;
///
/// let id = SectionId::new(12);
/// assert_eq!(id.get(), 12);
/// assert_eq!(id.to_string(), "12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u32);

impl SectionId {
    /// Creates a new section identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Returns `true` when `next` immediately follows this id.
    #[must_use]
    pub const fn is_followed_by(self, next: Self) -> bool {
        match self.0.checked_add(1) {
            Some(expected) => expected == next.0,
            None => false,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the named physical fault a subsection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParentId(u32);

impl ParentId {
    /// Creates a new parent fault identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An atomic discretised patch of a fault surface.
///
/// Geometry is never read from the section itself; distances come from a
/// [`crate::DistanceProvider`].
///
/// # Examples
/// ```
/// use rupture_core::{FaultSection, ParentId, SectionId};
///
/// let section = FaultSection::new(7, 2);
/// assert_eq!(section.id(), SectionId::new(7));
/// assert_eq!(section.parent(), ParentId::new(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaultSection {
    id: SectionId,
    parent: ParentId,
}

impl FaultSection {
    /// Creates a section from raw section and parent identifiers.
    #[must_use]
    pub const fn new(id: u32, parent: u32) -> Self {
        Self {
            id: SectionId::new(id),
            parent: ParentId::new(parent),
        }
    }

    /// Returns the section identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn id(&self) -> SectionId { self.id }

    /// Returns the parent fault identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn parent(&self) -> ParentId { self.parent }
}
