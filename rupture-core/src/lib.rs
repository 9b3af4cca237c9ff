//! Rupture core library.
//!
//! Reconstructs how a multi-fault earthquake rupture jumps between faults:
//! sections are grouped into same-fault clusters, cluster pairs are joined
//! through minimum-cost paths, and the resulting jumps are arranged into a
//! canonical [`ClusterRupture`] tree.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cluster;
mod connection_search;
mod dedup;
mod distance;
mod error;
mod graph;
mod isolation;
mod jump;
mod rupture;
mod search;
mod section;
mod strategy;
mod tree;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::ConnectionSearchBuilder,
    cluster::{FaultCluster, clusterize},
    connection_search::ConnectionSearch,
    distance::{CachedDistances, DistanceProvider},
    error::{
        AMBIGUOUS_JUMP_WARNING, DistanceError, DistanceErrorCode, JumpError, JumpErrorCode,
        Result, RuptureError, RuptureErrorCode,
    },
    jump::{Jump, SectionPair},
    rupture::{BranchPoint, ClusterRupture, RuptureNavigator, Splay},
    search::CostMode,
    section::{FaultSection, ParentId, SectionId},
    strategy::{ClosestSectionStrategy, ConnectionStrategy},
};
