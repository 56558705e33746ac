//! Shortest-path length estimation over unweighted graphs
//!
//! Small components get an exact all-pairs computation, one BFS per node.
//! Larger ones are estimated from a sample of BFS sources drawn without
//! replacement. Each sampled source contributes *all* of its distances, so
//! the estimate is a mean over whole distance rows rather than over
//! uniformly drawn pairs; its variance shrinks as more sources are taken.

use std::collections::VecDeque;

use rand::seq::index;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::graph::CompressedGraph;

/// Marker for nodes a traversal never reached
pub const UNREACHED: u32 = u32::MAX;

/// Summary of shortest-path lengths over ordered node pairs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLengthStats {
    /// Mean distance over every recorded pair; zero if there were none
    pub mean: f64,
    pub min: u32,
    /// Largest recorded distance; the diameter when `exact`
    pub max: u32,
    /// Number of ordered pairs the mean covers
    pub pair_count: u64,
    /// Number of BFS sources
    pub sources: usize,
    pub exact: bool,
}

impl PathLengthStats {
    pub fn diameter(&self) -> Option<u32> {
        self.exact.then_some(self.max)
    }
}

/// Running totals of distances from one or more sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DistanceAccumulator {
    sum: u64,
    count: u64,
    min: u32,
    max: u32,
    sources: usize,
}

impl Default for DistanceAccumulator {
    fn default() -> Self {
        Self {
            sum: 0,
            count: 0,
            min: u32::MAX,
            max: 0,
            sources: 0,
        }
    }
}

impl DistanceAccumulator {
    /// Record every reached node except the source itself
    fn add_row(&mut self, distances: &[u32]) {
        for &d in distances {
            if d == 0 || d == UNREACHED {
                continue;
            }
            self.sum += u64::from(d);
            self.count += 1;
            self.min = self.min.min(d);
            self.max = self.max.max(d);
        }
        self.sources += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        self.sum += other.sum;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sources += other.sources;
        self
    }

    fn finish(self, exact: bool) -> PathLengthStats {
        if self.count == 0 {
            return PathLengthStats {
                mean: 0.0,
                min: 0,
                max: 0,
                pair_count: 0,
                sources: self.sources,
                exact,
            };
        }

        PathLengthStats {
            mean: self.sum as f64 / self.count as f64,
            min: self.min,
            max: self.max,
            pair_count: self.count,
            sources: self.sources,
            exact,
        }
    }
}

/// Reusable per-worker BFS buffers
struct BfsScratch {
    distances: Vec<u32>,
    queue: VecDeque<u32>,
}

impl BfsScratch {
    fn new(node_count: usize) -> Self {
        Self {
            distances: vec![UNREACHED; node_count],
            queue: VecDeque::new(),
        }
    }

    /// Fill `distances` with hop counts from `source`
    fn run(&mut self, graph: &CompressedGraph, source: u32) -> &[u32] {
        self.distances.fill(UNREACHED);
        self.queue.clear();

        self.distances[source as usize] = 0;
        self.queue.push_back(source);

        while let Some(node) = self.queue.pop_front() {
            let next = self.distances[node as usize] + 1;
            for &neighbor in graph.neighbors(node as usize) {
                if self.distances[neighbor as usize] == UNREACHED {
                    self.distances[neighbor as usize] = next;
                    self.queue.push_back(neighbor);
                }
            }
        }

        &self.distances
    }
}

/// Hop distance from `source` to every node, `UNREACHED` where there is no path
pub fn single_source_distances(graph: &CompressedGraph, source: u32) -> Vec<u32> {
    let mut scratch = BfsScratch::new(graph.node_count);
    scratch.run(graph, source);
    scratch.distances
}

/// Accumulate distance rows from each source in parallel; rows are summed
/// per worker and merged at the join.
fn accumulate_from(graph: &CompressedGraph, sources: &[u32]) -> DistanceAccumulator {
    sources
        .par_iter()
        .map_init(
            || BfsScratch::new(graph.node_count),
            |scratch, &source| {
                let mut acc = DistanceAccumulator::default();
                acc.add_row(scratch.run(graph, source));
                acc
            },
        )
        .reduce(DistanceAccumulator::default, DistanceAccumulator::merge)
}

/// Exact path-length statistics over all ordered pairs `(s, t)`, `s != t`
pub fn all_pairs_path_lengths(graph: &CompressedGraph) -> PathLengthStats {
    let sources: Vec<u32> = (0..graph.node_count as u32).collect();
    accumulate_from(graph, &sources).finish(true)
}

/// Path-length estimate from up to `sample_size` distinct random sources
pub fn sampled_path_lengths<R: Rng + ?Sized>(
    graph: &CompressedGraph,
    sample_size: usize,
    rng: &mut R,
) -> PathLengthStats {
    let amount = sample_size.min(graph.node_count);
    let sources: Vec<u32> = index::sample(rng, graph.node_count, amount)
        .into_iter()
        .map(|i| i as u32)
        .collect();

    accumulate_from(graph, &sources).finish(false)
}

/// Exact statistics when the graph has at most `exact_threshold` nodes,
/// otherwise a sampled estimate from `sample_size` sources.
///
/// Intended for a connected graph such as an extracted LCC; on a
/// disconnected one unreachable pairs are left out of the mean.
pub fn estimate_path_lengths<R: Rng + ?Sized>(
    graph: &CompressedGraph,
    exact_threshold: usize,
    sample_size: usize,
    rng: &mut R,
) -> PathLengthStats {
    if graph.node_count <= exact_threshold {
        log::info!("Computing exact path lengths over {} nodes", graph.node_count);
        all_pairs_path_lengths(graph)
    } else {
        log::info!(
            "Estimating path lengths from {} of {} nodes",
            sample_size.min(graph.node_count),
            graph.node_count
        );
        sampled_path_lengths(graph, sample_size, rng)
    }
}
