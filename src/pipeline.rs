//! End-to-end small-world analysis

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::data::EdgeFeed;
use crate::error::AnalysisError;
use crate::graph::clustering::average_clustering;
use crate::graph::components::largest_component_subgraph;
use crate::graph::paths::{estimate_path_lengths, PathLengthStats};
use crate::graph::{CompressedGraph, GraphBuilder};
use crate::null_model::generate_null_ensemble;
use crate::stats::{aggregate, classify, Classification, NullDistribution, SignificanceTest};

/// Everything the analysis measured; the only thing handed to a report sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub node_count: usize,
    pub edge_count: usize,
    pub self_loops: usize,
    /// Feed records dropped for a missing endpoint
    pub skipped_edges: usize,
    pub average_degree: f64,

    pub lcc_size: usize,
    pub lcc_fraction: f64,

    pub observed_clustering: f64,
    pub observed_path_length: PathLengthStats,
    /// Only known when path lengths were computed exactly
    pub diameter: Option<u32>,

    pub trials: usize,
    pub null_clustering: NullDistribution,
    pub null_path_length: NullDistribution,
    pub under_randomized_trials: usize,
    pub mean_swap_fraction: f64,

    pub clustering_test: SignificanceTest,
    pub path_length_test: SignificanceTest,
    pub significance_level: f64,

    pub classification: Classification,
    pub seed: Option<u64>,
}

/// Analyze an edge feed: build the graph, then run [`analyze_graph`]
pub fn analyze_feed(
    feed: &EdgeFeed,
    config: &AnalysisConfig,
) -> Result<StatisticsRecord, AnalysisError> {
    let builder = GraphBuilder::from_feed(feed);
    let skipped = builder.skipped_edges();
    let graph = builder.build();

    let mut record = analyze_graph(&graph, config)?;
    record.skipped_edges = skipped;
    Ok(record)
}

/// Analyze a graph with randomness seeded from `config.seed`, or from
/// entropy when no seed is set
pub fn analyze_graph(
    graph: &CompressedGraph,
    config: &AnalysisConfig,
) -> Result<StatisticsRecord, AnalysisError> {
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    analyze_with_rng(graph, config, &mut rng)
}

/// Analyze a graph drawing every random choice from `rng`
pub fn analyze_with_rng<R: Rng + ?Sized>(
    graph: &CompressedGraph,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<StatisticsRecord, AnalysisError> {
    config.validate()?;
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }

    let node_count = graph.node_count;
    let edge_count = graph.edge_count();
    log::info!("Analyzing graph with {} nodes and {} edges", node_count, edge_count);

    let observed_clustering = average_clustering(graph);
    log::info!("C_obs = {:.6}", observed_clustering);

    let lcc = largest_component_subgraph(graph)?;
    log::info!(
        "Largest connected component: {} nodes ({:.1}%)",
        lcc.node_count,
        100.0 * lcc.node_count as f64 / node_count as f64
    );

    let observed_path_length =
        estimate_path_lengths(&lcc, config.exact_threshold, config.observed_sources, rng);
    log::info!(
        "L_obs = {:.4} ({})",
        observed_path_length.mean,
        if observed_path_length.exact { "exact" } else { "sampled" }
    );

    let samples = generate_null_ensemble(graph, config, rng)?;
    let comparison = aggregate(
        &samples,
        observed_clustering,
        observed_path_length.mean,
        config.significance_level,
    );

    let classification = classify(
        observed_clustering,
        comparison.clustering.mean,
        observed_path_length.mean,
        comparison.path_length.mean,
    );
    log::info!(
        "sigma = {} => {}",
        classification
            .sigma
            .map_or_else(|| "undefined".to_string(), |s| format!("{s:.4}")),
        classification.verdict
    );

    let under_randomized_trials = samples.iter().filter(|s| s.is_under_randomized()).count();
    let mean_swap_fraction =
        samples.iter().map(|s| s.swaps.fraction()).sum::<f64>() / samples.len() as f64;

    Ok(StatisticsRecord {
        node_count,
        edge_count,
        self_loops: graph.self_loop_count(),
        skipped_edges: 0,
        average_degree: graph.average_degree(),
        lcc_size: lcc.node_count,
        lcc_fraction: lcc.node_count as f64 / node_count as f64,
        observed_clustering,
        observed_path_length,
        diameter: observed_path_length.diameter(),
        trials: samples.len(),
        null_clustering: comparison.clustering,
        null_path_length: comparison.path_length,
        under_randomized_trials,
        mean_swap_fraction,
        clustering_test: comparison.clustering_test,
        path_length_test: comparison.path_length_test,
        significance_level: config.significance_level,
        classification,
        seed: config.seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EdgeRecord;

    fn config(trials: usize) -> AnalysisConfig {
        AnalysisConfig::new(trials, Some(2024))
    }

    #[test]
    fn empty_feed_is_fatal() {
        let result = analyze_feed(&EdgeFeed::default(), &config(5));
        assert_eq!(result, Err(AnalysisError::EmptyGraph));
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let mut feed = EdgeFeed::default();
        feed.push("R", EdgeRecord::new("a", "b"));

        let result = analyze_feed(&feed, &config(0));
        assert!(matches!(result, Err(AnalysisError::InvalidConfig { .. })));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut feed = EdgeFeed::default();
        for i in 0..30 {
            feed.push("R", EdgeRecord::new(format!("n{i}"), format!("n{}", (i + 1) % 30)));
            feed.push("R", EdgeRecord::new(format!("n{i}"), format!("n{}", (i + 2) % 30)));
        }

        let first = analyze_feed(&feed, &config(10)).unwrap();
        let second = analyze_feed(&feed, &config(10)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn small_triangle_reports_degenerate_nulls() {
        // Three nodes cannot be rewired, so every trial is under-randomized
        let mut feed = EdgeFeed::default();
        feed.push("R", EdgeRecord::new("a", "b"));
        feed.push("R", EdgeRecord::new("b", "c"));
        feed.push("R", EdgeRecord::new("c", "a"));

        let record = analyze_feed(&feed, &config(4)).unwrap();
        assert_eq!(record.under_randomized_trials, 4);
        assert_eq!(record.mean_swap_fraction, 0.0);
        assert_eq!(record.observed_clustering, 1.0);
        assert_eq!(record.null_clustering.mean, 1.0);
        assert_eq!(record.classification.sigma, Some(1.0));
        assert!(!record.classification.verdict.is_small_world());
    }
}
