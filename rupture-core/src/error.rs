//! Error types for the rupture core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, num::NonZeroUsize, sync::Arc};

use thiserror::Error;

use crate::{cluster::FaultCluster, section::SectionId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Stable code attached to the structured warning emitted when a connection
/// strategy reports the same section pair more than once with different
/// distances. The smallest distance is kept and the search continues.
pub const AMBIGUOUS_JUMP_WARNING: &str = "AMBIGUOUS_JUMP";

/// An error produced by a [`crate::DistanceProvider`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DistanceError {
    /// The provider has no geometry for the requested section.
    #[error("section {section} is unknown to the distance provider")]
    UnknownSection {
        /// The section that could not be resolved.
        section: SectionId,
    },
    /// The provider produced a NaN or infinite distance.
    #[error("distance between sections {left} and {right} is not finite")]
    NonFinite {
        /// First section of the pair.
        left: SectionId,
        /// Second section of the pair.
        right: SectionId,
    },
}

define_error_codes! {
    /// Stable codes describing [`DistanceError`] variants.
    enum DistanceErrorCode for DistanceError {
        /// The provider has no geometry for the requested section.
        UnknownSection => UnknownSection { .. } => "DISTANCE_UNKNOWN_SECTION",
        /// The provider produced a NaN or infinite distance.
        NonFinite => NonFinite { .. } => "DISTANCE_NON_FINITE",
    }
}

/// An error produced while constructing a [`crate::Jump`] or while a
/// [`crate::ConnectionStrategy`] enumerates candidate jumps.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JumpError {
    /// Both ends of the jump lie on the same cluster.
    #[error("jump from section {from} to section {to} never leaves cluster {cluster}")]
    SameCluster {
        /// Departure section.
        from: SectionId,
        /// Arrival section.
        to: SectionId,
        /// The cluster containing both sections.
        cluster: Arc<FaultCluster>,
    },
    /// A jump endpoint is not a member of the cluster it claims.
    #[error("section {section} is not part of cluster {cluster}")]
    SectionOutsideCluster {
        /// The offending section.
        section: SectionId,
        /// The cluster the section was attributed to.
        cluster: Arc<FaultCluster>,
    },
    /// The jump distance is negative, NaN or infinite.
    #[error("jump from section {from} to section {to} has invalid distance {distance}")]
    InvalidDistance {
        /// Departure section.
        from: SectionId,
        /// Arrival section.
        to: SectionId,
        /// The rejected distance.
        distance: f64,
    },
    /// The distance provider failed while the strategy measured a section pair.
    #[error("distance lookup failed: {error}")]
    Distance {
        /// Underlying provider error.
        #[source]
        error: DistanceError,
    },
}

impl From<DistanceError> for JumpError {
    fn from(error: DistanceError) -> Self {
        Self::Distance { error }
    }
}

define_error_codes! {
    /// Stable codes describing [`JumpError`] variants.
    enum JumpErrorCode for JumpError {
        /// Both ends of the jump lie on the same cluster.
        SameCluster => SameCluster { .. } => "JUMP_SAME_CLUSTER",
        /// A jump endpoint is not a member of the cluster it claims.
        SectionOutsideCluster => SectionOutsideCluster { .. } => "JUMP_SECTION_OUTSIDE_CLUSTER",
        /// The jump distance is negative, NaN or infinite.
        InvalidDistance => InvalidDistance { .. } => "JUMP_INVALID_DISTANCE",
        /// The distance provider failed.
        DistanceFailure => Distance { .. } => "JUMP_DISTANCE_FAILURE",
    }
}

/// Error type produced when configuring or running a
/// [`crate::ConnectionSearch`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RuptureError {
    /// The rupture contained no sections.
    #[error("rupture contains no sections")]
    EmptyRupture,
    /// A section id was listed more than once.
    #[error("section {section} appears more than once in the rupture")]
    DuplicateSection {
        /// The repeated section id.
        section: SectionId,
    },
    /// Tree construction finished without placing every cluster.
    #[error(
        "clusters unreachable from start cluster {start}: {}",
        describe_clusters(.unreached)
    )]
    DisconnectedRupture {
        /// The cluster the tree was grown from.
        start: Arc<FaultCluster>,
        /// Clusters that no jump reached, in canonical order.
        unreached: Vec<Arc<FaultCluster>>,
    },
    /// The rupture has more clusters than the configured ceiling.
    #[error("rupture has {clusters} clusters but the configured limit is {limit}")]
    TooManyClusters {
        /// Number of clusters found in the rupture.
        clusters: usize,
        /// Configured ceiling.
        limit: NonZeroUsize,
    },
    /// The cluster ceiling must be greater than zero.
    #[error("max_clusters must be at least 1 (got {got})")]
    InvalidMaxClusters {
        /// The rejected ceiling.
        got: usize,
    },
    /// The maximum jump distance must be finite and positive.
    #[error("max_jump_distance must be finite and positive (got {got})")]
    InvalidMaxJumpDistance {
        /// The rejected distance.
        got: f64,
    },
    /// The connection strategy failed to enumerate candidate jumps.
    #[error("connection strategy failed: {error}")]
    Strategy {
        /// Underlying strategy error.
        #[source]
        error: JumpError,
    },
}

impl From<JumpError> for RuptureError {
    fn from(error: JumpError) -> Self {
        Self::Strategy { error }
    }
}

define_error_codes! {
    /// Stable codes describing [`RuptureError`] variants.
    enum RuptureErrorCode for RuptureError {
        /// The rupture contained no sections.
        EmptyRupture => EmptyRupture => "RUPTURE_EMPTY",
        /// A section id was listed more than once.
        DuplicateSection => DuplicateSection { .. } => "RUPTURE_DUPLICATE_SECTION",
        /// Tree construction finished without placing every cluster.
        DisconnectedRupture => DisconnectedRupture { .. } => "RUPTURE_DISCONNECTED",
        /// The rupture has more clusters than the configured ceiling.
        TooManyClusters => TooManyClusters { .. } => "RUPTURE_TOO_MANY_CLUSTERS",
        /// The cluster ceiling must be greater than zero.
        InvalidMaxClusters => InvalidMaxClusters { .. } => "RUPTURE_INVALID_MAX_CLUSTERS",
        /// The maximum jump distance must be finite and positive.
        InvalidMaxJumpDistance => InvalidMaxJumpDistance { .. } => "RUPTURE_INVALID_MAX_JUMP_DISTANCE",
        /// The connection strategy failed to enumerate candidate jumps.
        StrategyFailure => Strategy { .. } => "RUPTURE_STRATEGY_FAILURE",
    }
}

impl RuptureError {
    /// Retrieve the inner [`JumpErrorCode`] when the error originated in a
    /// [`crate::ConnectionStrategy`].
    #[must_use]
    pub const fn strategy_code(&self) -> Option<JumpErrorCode> {
        match self {
            Self::Strategy { error } => Some(error.code()),
            _ => None,
        }
    }
}

fn describe_clusters(clusters: &[Arc<FaultCluster>]) -> String {
    clusters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RuptureError>;
