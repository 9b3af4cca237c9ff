//! Unit tests for the rupture tree and its navigator.

use rstest::{fixture, rstest};

use super::*;
use crate::{
    clusterize,
    dedup::deduplicate_jumps,
    graph::ConnectionGraph,
    search::{CostMode, PathSearch},
    test_utils::{PairTable, sections},
    tree::RuptureTreeBuilder,
};

/// Hub H(1-3) with leaves L1(10), L2(20) and L3(30-31); L4(40) hangs off L3.
#[fixture]
fn branching() -> ClusterRupture {
    let clusters = clusterize(&sections(&[
        (1, 1),
        (2, 1),
        (3, 1),
        (10, 2),
        (20, 3),
        (30, 4),
        (31, 4),
        (40, 5),
    ]))
    .expect("clusterize must succeed");
    let table = PairTable::new(&[(3, 10, 1.0), (2, 20, 2.0), (1, 30, 3.0), (31, 40, 1.0)]);
    let graph = ConnectionGraph::build(clusters, &table).expect("graph must build");
    let jumps = deduplicate_jumps(PathSearch::new(&graph, CostMode::Bottleneck).first_jumps());
    RuptureTreeBuilder::new(&graph, &jumps)
        .build(0)
        .expect("tree must build")
}

fn cluster<'a>(rupture: &'a ClusterRupture, key: u32) -> &'a Arc<FaultCluster> {
    rupture
        .clusters()
        .find(|cluster| cluster.key() == SectionId::new(key))
        .expect("cluster must be present")
}

fn keys<'a>(clusters: impl IntoIterator<Item = &'a Arc<FaultCluster>>) -> Vec<u32> {
    clusters
        .into_iter()
        .map(|cluster| cluster.key().get())
        .collect()
}

#[rstest]
fn counts_cover_the_whole_tree(branching: ClusterRupture) {
    assert_eq!(keys(branching.trunk()), vec![1, 10]);
    assert_eq!(branching.cluster_count(), 5);
    assert_eq!(branching.jump_count(), 4);
    assert_eq!(branching.splay_count(), 2);
    assert_eq!(branching.section_count(), 8);
    assert!(!branching.is_single_strand());
    assert_eq!(branching.start().map(|start| start.key().get()), Some(1));
}

#[rstest]
fn strands_and_jumps_are_listed_depth_first(branching: ClusterRupture) {
    let strand_starts: Vec<_> = branching
        .strands()
        .iter()
        .map(|strand| strand.trunk()[0].key().get())
        .collect();
    assert_eq!(strand_starts, vec![1, 20, 30]);

    let pairs: Vec<_> = branching
        .jumps()
        .map(|jump| (jump.from_section().get(), jump.to_section().get()))
        .collect();
    assert_eq!(pairs, vec![(3, 10), (2, 20), (1, 30), (31, 40)]);
    assert_eq!(keys(branching.clusters()), vec![1, 10, 20, 30, 40]);
}

#[rstest]
fn splays_follow_their_branch_section(branching: ClusterRupture) {
    let ordered: Vec<_> = branching
        .ordered_sections()
        .into_iter()
        .map(SectionId::get)
        .collect();
    assert_eq!(ordered, vec![1, 30, 31, 40, 2, 20, 3, 10]);
}

#[rstest]
fn splays_are_found_by_branch_point(branching: ClusterRupture) {
    let hub = Arc::clone(&branching.trunk()[0]);
    let branch = BranchPoint::new(Arc::clone(&hub), SectionId::new(1));
    let from_first: Vec<_> = branching.splays_from(&branch).collect();
    assert_eq!(from_first.len(), 1);
    assert_eq!(keys(from_first[0].rupture().trunk()), vec![30, 40]);

    let nowhere = BranchPoint::new(hub, SectionId::new(3));
    assert_eq!(branching.splays_from(&nowhere).count(), 0);
}

#[rstest]
#[case(31, true)]
#[case(40, true)]
#[case(5, false)]
fn section_membership_spans_splays(
    branching: ClusterRupture,
    #[case] section: u32,
    #[case] expected: bool,
) {
    assert_eq!(branching.contains_section(SectionId::new(section)), expected);
}

#[rstest]
fn display_lists_strands_and_splays(branching: ClusterRupture) {
    assert_eq!(
        branching.to_string(),
        "[1:1-3] [2:10]\n\t--splay from [1:2]: [3:20]\n\t--splay from [1:1]: [4:30-31] [5:40]"
    );
}

#[rstest]
fn navigator_links_strands_and_splays(branching: ClusterRupture) {
    let navigator = branching.navigator();
    let hub = cluster(&branching, 1);
    let far = cluster(&branching, 30);
    let tip = cluster(&branching, 40);

    assert_eq!(navigator.root().map(|root| root.key().get()), Some(1));
    assert!(navigator.parent(hub).is_none());
    assert_eq!(navigator.parent(tip).map(|parent| parent.key().get()), Some(30));
    assert_eq!(navigator.parent(far).map(|parent| parent.key().get()), Some(1));
    assert_eq!(keys(navigator.children(hub)), vec![10, 20, 30]);
    assert_eq!(keys(navigator.descendants(hub)), vec![10, 20, 30, 40]);
    assert_eq!(keys(navigator.descendants(far)), vec![40]);
    assert!(navigator.descendants(tip).is_empty());
}

#[rstest]
fn navigator_orients_jumps(branching: ClusterRupture) {
    let navigator = branching.navigator();
    let hub = cluster(&branching, 1);
    let far = cluster(&branching, 30);
    let tip = cluster(&branching, 40);
    let leaf = cluster(&branching, 10);

    assert!(navigator.jump_to(hub).is_none());
    let into_far = navigator.jump_to(far).expect("splay root has a jump");
    assert_eq!(into_far.from_section(), SectionId::new(1));

    let back = navigator.jump_between(tip, far).expect("clusters are linked");
    assert_eq!(back.from_section(), SectionId::new(40));
    assert_eq!(back.to_section(), SectionId::new(31));
    assert!(navigator.jump_between(leaf, far).is_none());
    assert!(navigator.contains(leaf));
}

/// A(1-3) and B(10-12) joined by the single connection in `entries`, grown
/// from A.
fn two_faults(entries: &[(u32, u32, f64)]) -> ClusterRupture {
    let clusters = clusterize(&sections(&[(1, 1), (2, 1), (3, 1), (10, 2), (11, 2), (12, 2)]))
        .expect("clusterize must succeed");
    let graph = ConnectionGraph::build(clusters, &PairTable::new(entries)).expect("graph must build");
    let jumps = deduplicate_jumps(PathSearch::new(&graph, CostMode::Bottleneck).first_jumps());
    RuptureTreeBuilder::new(&graph, &jumps)
        .build(0)
        .expect("tree must build")
}

#[rstest]
#[case::entered_at_far_end(&[(3, 12, 1.0)], vec![1, 2, 3, 12, 11, 10], "[1:1-3] [2:12-10]", true)]
#[case::left_from_near_end(&[(1, 10, 1.0)], vec![3, 2, 1, 10, 11, 12], "[1:3-1] [2:10-12]", true)]
#[case::entered_mid_cluster(&[(1, 11, 1.0)], vec![3, 2, 1, 10, 11, 12], "[1:3-1] [2:10-12]", false)]
#[case::left_mid_cluster(&[(2, 11, 1.0)], vec![1, 2, 3, 10, 11, 12], "[1:1-3] [2:10-12]", false)]
fn strands_are_read_through_their_jumps(
    #[case] entries: &[(u32, u32, f64)],
    #[case] expected: Vec<u32>,
    #[case] rendered: &str,
    #[case] single_strand: bool,
) {
    let rupture = two_faults(entries);
    let ordered: Vec<_> = rupture
        .ordered_sections()
        .into_iter()
        .map(SectionId::get)
        .collect();
    assert_eq!(ordered, expected);
    assert_eq!(rupture.to_string(), rendered);
    assert!(rupture.splays().is_empty());
    assert_eq!(rupture.is_single_strand(), single_strand);
}

#[test]
fn oriented_jumps_refer_to_oriented_clusters() {
    let rupture = two_faults(&[(3, 12, 1.0)]);
    let jump = &rupture.trunk_jumps()[0];
    assert_eq!(jump.from_section(), SectionId::new(3));
    assert_eq!(jump.to_section(), SectionId::new(12));
    assert!(jump.to_cluster().is_reversed());
    assert_eq!(jump.to_cluster(), &rupture.trunk()[1]);
    assert_eq!(jump.to_cluster().first(), jump.to_section());
    assert_eq!(jump.to_cluster().key(), SectionId::new(10));

    let navigator = rupture.navigator();
    let entered = navigator
        .jump_to(&rupture.trunk()[1])
        .expect("second cluster has an incoming jump");
    assert_eq!(entered, jump);

    let clusters = clusterize(&sections(&[(10, 2), (11, 2), (12, 2)])).expect("one run");
    assert!(!clusters[0].is_reversed());
    assert!(navigator.contains(&clusters[0]));
}

#[test]
fn single_cluster_rupture_is_trivial() {
    let clusters = clusterize(&sections(&[(7, 3), (8, 3)])).expect("clusterize must succeed");
    let graph = ConnectionGraph::build(clusters, &PairTable::default()).expect("graph must build");
    let rupture = RuptureTreeBuilder::new(&graph, &[])
        .build(0)
        .expect("tree must build");

    assert_eq!(rupture.cluster_count(), 1);
    assert_eq!(rupture.jump_count(), 0);
    assert_eq!(rupture.splay_count(), 0);
    assert_eq!(rupture.jumps().count(), 0);
    assert_eq!(rupture.to_string(), "[3:7-8]");
    assert!(rupture.is_single_strand());
    assert!(!rupture.trunk()[0].is_reversed());
}
