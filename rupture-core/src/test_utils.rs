//! Shared test utilities for `rupture-core`.

use std::sync::Arc;

use crate::{
    cluster::FaultCluster, error::JumpError, jump::Jump, section::FaultSection,
    section::SectionId, strategy::ConnectionStrategy,
};

/// Turns `(section id, parent id)` tuples into sections.
pub(crate) fn sections(raw: &[(u32, u32)]) -> Vec<FaultSection> {
    raw.iter()
        .map(|&(id, parent)| FaultSection::new(id, parent))
        .collect()
}

/// [`ConnectionStrategy`] answering from a fixed table of
/// `(section, section, distance)` entries.
///
/// Entries are undirected and may repeat a pair to simulate an ambiguous
/// strategy.
#[derive(Clone, Debug, Default)]
pub(crate) struct PairTable {
    entries: Vec<(SectionId, SectionId, f64)>,
}

impl PairTable {
    pub(crate) fn new(entries: &[(u32, u32, f64)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(a, b, distance)| (SectionId::new(a), SectionId::new(b), distance))
                .collect(),
        }
    }
}

impl ConnectionStrategy for PairTable {
    fn candidate_jumps(
        &self,
        from: &Arc<FaultCluster>,
        to: &Arc<FaultCluster>,
    ) -> Result<Vec<Jump>, JumpError> {
        let mut jumps = Vec::new();
        for &(a, b, distance) in &self.entries {
            let (departure, arrival) = if from.contains(a) && to.contains(b) {
                (a, b)
            } else if from.contains(b) && to.contains(a) {
                (b, a)
            } else {
                continue;
            };
            jumps.push(Jump::new(
                departure,
                Arc::clone(from),
                arrival,
                Arc::clone(to),
                distance,
            )?);
        }
        Ok(jumps)
    }
}
