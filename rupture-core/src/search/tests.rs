//! Unit tests for the cluster path search.

use rstest::rstest;

use super::*;
use crate::{
    clusterize,
    section::SectionId,
    test_utils::{PairTable, sections},
};

/// A(1-3), B(10-12), C(20-21) on three parent faults.
const TRIANGLE: &[(u32, u32)] = &[
    (1, 1),
    (2, 1),
    (3, 1),
    (10, 2),
    (11, 2),
    (12, 2),
    (20, 3),
    (21, 3),
];

fn graph(raw: &[(u32, u32)], entries: &[(u32, u32, f64)]) -> ConnectionGraph {
    let clusters = clusterize(&sections(raw)).expect("clusterize must succeed");
    ConnectionGraph::build(clusters, &PairTable::new(entries)).expect("graph must build")
}

fn section_pairs(jumps: &[Jump]) -> Vec<(u32, u32)> {
    jumps
        .iter()
        .map(|jump| (jump.from_section().get(), jump.to_section().get()))
        .collect()
}

#[test]
fn equal_cost_paths_with_distinct_first_hops_are_both_kept() {
    let graph = graph(TRIANGLE, &[(3, 10, 2.0), (1, 20, 1.5), (12, 20, 2.0)]);
    let search = PathSearch::new(&graph, CostMode::Bottleneck);

    let result = search.shortest_paths(0, 1);
    assert_eq!(result.best(), Some(2.0));
    let routes: Vec<_> = result.paths().iter().map(ClusterPath::clusters).collect();
    assert_eq!(routes, vec![&[0, 2, 1][..], &[0, 1][..]]);
}

#[test]
fn first_jumps_follow_pair_order() {
    let graph = graph(TRIANGLE, &[(3, 10, 2.0), (1, 20, 1.5), (12, 20, 2.0)]);
    let jumps = PathSearch::new(&graph, CostMode::Bottleneck).first_jumps();
    assert_eq!(
        section_pairs(&jumps),
        vec![(1, 20), (3, 10), (1, 20), (10, 3), (12, 20)]
    );
}

#[rstest]
#[case(CostMode::Bottleneck, 1.0, vec![0, 1, 2])]
#[case(CostMode::Cumulative, 1.5, vec![0, 2])]
fn cost_mode_selects_route(
    #[case] mode: CostMode,
    #[case] expected_cost: f64,
    #[case] expected_route: Vec<usize>,
) {
    let graph = graph(
        &[(1, 1), (10, 2), (20, 3)],
        &[(1, 10, 1.0), (10, 20, 1.0), (1, 20, 1.5)],
    );
    let result = PathSearch::new(&graph, mode).shortest_paths(0, 2);
    assert_eq!(result.best(), Some(expected_cost));
    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.paths()[0].clusters(), expected_route.as_slice());
}

#[test]
fn unconnected_pair_yields_no_path() {
    let graph = graph(&[(1, 1), (10, 2), (20, 3)], &[(1, 10, 1.0)]);
    let search = PathSearch::new(&graph, CostMode::Bottleneck);

    let result = search.shortest_paths(0, 2);
    assert_eq!(result.best(), None);
    assert!(result.paths().is_empty());
    assert_eq!(section_pairs(&search.first_jumps()), vec![(1, 10)]);
}

#[test]
fn intermediate_clusters_are_used_once_per_path() {
    // A long chain: the only route from the first to the last cluster visits
    // every cluster exactly once.
    let raw: Vec<_> = (0..6).map(|k| (k * 10 + 1, k + 1)).collect();
    let entries: Vec<_> = (0..5)
        .map(|k| (k * 10 + 1, (k + 1) * 10 + 1, f64::from(k + 1)))
        .collect();
    let graph = graph(&raw, &entries);

    let result = PathSearch::new(&graph, CostMode::Cumulative).shortest_paths(0, 5);
    assert_eq!(result.best(), Some(15.0));
    assert_eq!(result.paths()[0].clusters(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(
        result.paths()[0].first_jump().map(Jump::to_section),
        Some(SectionId::new(11))
    );
}

#[test]
fn same_first_hop_ties_are_not_duplicated() {
    // Two equally cheap routes A-B-D and A-B-C-D share the first hop B.
    let graph = graph(
        &[(1, 1), (10, 2), (20, 3), (30, 4)],
        &[(1, 10, 1.0), (10, 30, 1.0), (10, 20, 1.0), (20, 30, 1.0)],
    );
    let result = PathSearch::new(&graph, CostMode::Bottleneck).shortest_paths(0, 3);
    assert_eq!(result.best(), Some(1.0));
    assert_eq!(result.paths().len(), 1);
    assert_eq!(result.paths()[0].first_hop(), Some(1));
}
