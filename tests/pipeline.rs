//! End-to-end scenarios driven from in-memory edge feeds

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use small_world_analyzer::data::{EdgeFeed, EdgeRecord};
use small_world_analyzer::graph::GraphBuilder;
use small_world_analyzer::stats::Verdict;
use small_world_analyzer::{analyze_feed, AnalysisConfig, AnalysisError};

fn feed_from(edges: &[(String, String)]) -> EdgeFeed {
    let mut feed = EdgeFeed::default();
    for (a, b) in edges {
        feed.push("LINKED_TO", EdgeRecord::new(a.as_str(), b.as_str()));
    }
    feed
}

fn ring_lattice_edges(n: usize, half_k: usize) -> Vec<(String, String)> {
    (0..n)
        .flat_map(|i| (1..=half_k).map(move |j| (format!("v{i}"), format!("v{}", (i + j) % n))))
        .collect()
}

fn config(trials: usize, seed: u64) -> AnalysisConfig {
    AnalysisConfig::new(trials, Some(seed))
}

#[test]
fn five_node_fixture_is_exact() {
    let edges: Vec<_> = [("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "a"), ("a", "c")]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

    let record = analyze_feed(&feed_from(&edges), &config(20, 1)).unwrap();

    assert_eq!(record.node_count, 5);
    assert_eq!(record.edge_count, 6);
    assert_eq!(record.lcc_size, 5);
    assert_eq!(record.lcc_fraction, 1.0);
    assert!((record.average_degree - 2.4).abs() < 1e-12);

    // a: 1,1,2,1  b: 1,1,2,2  c: 1,1,1,2  d: 2,1,1,2  e: 1,2,2,1  -> 28 / 20
    let paths = record.observed_path_length;
    assert!(paths.exact);
    assert_eq!(paths.pair_count, 20);
    assert!((paths.mean - 1.4).abs() < 1e-12);
    assert_eq!(paths.min, 1);
    assert_eq!(paths.max, 2);
    assert_eq!(record.diameter, Some(2));

    // Local coefficients: a 1/3, b 1, c 1/3, d 0, e 0
    assert!((record.observed_clustering - (2.0 / 3.0 + 1.0) / 5.0).abs() < 1e-12);
    assert_eq!(record.trials, 20);
}

#[test]
fn edge_missing_an_endpoint_is_skipped() {
    let mut feed = feed_from(&ring_lattice_edges(10, 1));
    feed.push(
        "BROKEN",
        EdgeRecord {
            from: Some(Value::String("v0".into())),
            to: None,
        },
    );

    let record = analyze_feed(&feed, &config(5, 3)).unwrap();

    assert_eq!(record.skipped_edges, 1);
    assert_eq!(record.edge_count, 10);
    assert_eq!(record.node_count, 10);
}

#[test]
fn empty_feed_aborts_with_empty_graph() {
    let mut feed = EdgeFeed::default();
    feed.push("BROKEN", EdgeRecord::default());

    assert_eq!(
        analyze_feed(&feed, &config(5, 3)).unwrap_err(),
        AnalysisError::EmptyGraph
    );
}

#[test]
fn ring_lattice_shows_lattice_regime() {
    // 20 nodes, each tied to its 4 nearest neighbours
    let record = analyze_feed(&feed_from(&ring_lattice_edges(20, 2)), &config(60, 11)).unwrap();

    assert!((record.observed_clustering - 0.5).abs() < 1e-12);
    assert!(record.observed_path_length.exact);
    assert!((record.observed_path_length.mean - 55.0 / 19.0).abs() < 1e-12);
    assert_eq!(record.diameter, Some(5));

    // Paths are long compared with the rewired nulls, which drags sigma
    // below the clustering ratio alone
    let class = record.classification;
    let path_ratio = class.path_length_ratio.unwrap();
    assert!(path_ratio > 1.0, "L_obs/L_rand = {path_ratio}");
    assert!(class.sigma.unwrap() < class.clustering_ratio.unwrap());
    assert!(record.null_clustering.mean < record.observed_clustering);
}

#[test]
fn unclustered_torus_is_not_small_world() {
    // 6x6 periodic grid: 4-regular, no triangles
    let side = 6;
    let id = |r: usize, c: usize| format!("g{}_{}", r % side, c % side);
    let edges: Vec<_> = (0..side)
        .flat_map(|r| {
            (0..side).flat_map(move |c| [(id(r, c), id(r, c + 1)), (id(r, c), id(r + 1, c))])
        })
        .collect();

    let record = analyze_feed(&feed_from(&edges), &config(40, 5)).unwrap();

    assert_eq!(record.observed_clustering, 0.0);
    assert!(record.null_clustering.mean > 0.0);
    assert_eq!(record.classification.sigma, Some(0.0));
    assert_eq!(record.classification.verdict, Verdict::NotSmallWorld);
}

#[test]
fn watts_strogatz_graph_is_small_world() {
    let n = 200;
    let mut rng = SmallRng::seed_from_u64(17);
    let mut edges = ring_lattice_edges(n, 3);
    for edge in edges.iter_mut() {
        if rng.gen_bool(0.05) {
            edge.1 = format!("v{}", rng.gen_range(0..n));
        }
    }

    let record = analyze_feed(&feed_from(&edges), &config(30, 8)).unwrap();
    let class = record.classification;

    assert!(class.clustering_ratio.unwrap() > 3.0);
    assert!(class.sigma.unwrap() > 1.0);
    assert_eq!(class.verdict, Verdict::SmallWorld);
    assert!(record.clustering_test.significant);
    assert_eq!(record.clustering_test.p_value, 0.0);
}

#[test]
fn oversized_swap_factor_runs_to_completion() {
    let mut config = config(3, 12);
    config.swap_factor = usize::MAX / 2;

    let record = analyze_feed(&feed_from(&ring_lattice_edges(10, 1)), &config).unwrap();

    assert_eq!(record.trials, 3);
    assert_eq!(record.under_randomized_trials, 3);
    assert!(record.mean_swap_fraction < 1e-9);
    assert!(record.observed_path_length.exact);
}

#[test]
fn large_component_switches_to_sampling() {
    let mut config = config(3, 4);
    config.exact_threshold = 50;
    config.observed_sources = 20;
    config.null_sources = 20;

    let record = analyze_feed(&feed_from(&ring_lattice_edges(120, 2)), &config).unwrap();

    assert!(!record.observed_path_length.exact);
    assert_eq!(record.observed_path_length.sources, 20);
    assert_eq!(record.diameter, None);
}

#[test]
fn disconnected_graph_uses_largest_component_for_paths() {
    let mut edges = ring_lattice_edges(12, 1);
    edges.push(("x".into(), "y".into()));
    edges.push(("y".into(), "z".into()));

    let record = analyze_feed(&feed_from(&edges), &config(5, 9)).unwrap();

    assert_eq!(record.node_count, 15);
    assert_eq!(record.lcc_size, 12);
    assert!((record.lcc_fraction - 0.8).abs() < 1e-12);
    assert_eq!(record.diameter, Some(6));
}

#[test]
fn null_outputs_depend_on_seed_but_graph_does_not() {
    let edges = ring_lattice_edges(40, 2);
    let feed = feed_from(&edges);

    assert_eq!(GraphBuilder::from_feed(&feed).build(), GraphBuilder::from_feed(&feed).build());

    let first = analyze_feed(&feed, &config(15, 1)).unwrap();
    let again = analyze_feed(&feed, &config(15, 1)).unwrap();
    let other = analyze_feed(&feed, &config(15, 2)).unwrap();

    assert_eq!(first, again);
    assert_eq!(first.observed_clustering, other.observed_clustering);
    assert_ne!(first.null_clustering, other.null_clustering);
}
