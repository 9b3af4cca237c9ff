use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rupture_core::{
    ConnectionStrategy, FaultCluster, FaultSection, Jump, JumpError, SectionId,
};

/// Turns `(section id, parent id)` tuples into sections.
#[must_use]
pub fn sections(raw: &[(u32, u32)]) -> Vec<FaultSection> {
    raw.iter()
        .map(|&(id, parent)| FaultSection::new(id, parent))
        .collect()
}

/// Returns the cluster keys as plain integers.
pub fn keys<'a>(clusters: impl IntoIterator<Item = &'a Arc<FaultCluster>>) -> Vec<u32> {
    clusters
        .into_iter()
        .map(|cluster| cluster.key().get())
        .collect()
}

/// Connection strategy answering from a fixed `(section, section, distance)`
/// table. Entries are undirected.
#[derive(Clone, Debug, Default)]
pub struct PairTable {
    entries: Vec<(SectionId, SectionId, f64)>,
}

impl PairTable {
    #[must_use]
    pub fn new(entries: &[(u32, u32, f64)]) -> Self {
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

/// A randomly generated rupture whose clusters are guaranteed to be
/// connected through the table.
#[derive(Clone, Debug)]
pub struct RuptureFixture {
    pub sections: Vec<FaultSection>,
    pub table: PairTable,
    pub clusters: usize,
}

/// Generates `clusters` clusters of one to three sections each, linked by a
/// random spanning tree plus a few extra connections.
///
/// Distances are small integers so that equal-cost paths are common.
#[must_use]
pub fn generate_fixture(clusters: usize, seed: u64) -> RuptureFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut runs: Vec<Vec<u32>> = Vec::with_capacity(clusters);
    let mut sections = Vec::new();
    for parent in (1u32..).take(clusters) {
        let first = parent * 10 + 1;
        let length: u32 = rng.gen_range(1..=3);
        let run: Vec<u32> = (first..first + length).collect();
        sections.extend(run.iter().map(|&id| FaultSection::new(id, parent)));
        runs.push(run);
    }

    let mut entries = Vec::new();
    let mut link = |rng: &mut SmallRng, a: usize, b: usize| {
        let from = runs[a][rng.gen_range(0..runs[a].len())];
        let to = runs[b][rng.gen_range(0..runs[b].len())];
        let distance = f64::from(rng.gen_range(1u8..=4));
        entries.push((from, to, distance));
    };
    for cluster in 1..clusters {
        let anchor = rng.gen_range(0..cluster);
        link(&mut rng, cluster, anchor);
    }
    for a in 0..clusters {
        for b in (a + 1)..clusters {
            if rng.gen_bool(0.3) {
                link(&mut rng, a, b);
            }
        }
    }

    RuptureFixture {
        sections,
        table: PairTable::new(&entries),
        clusters,
    }
}
