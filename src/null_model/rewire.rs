//! Degree-preserving double edge swaps

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::CompressedGraph;

/// Swap target and attempt ceiling for one rewiring run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBudget {
    pub target_swaps: usize,
    pub max_attempts: usize,
}

impl SwapBudget {
    /// `swap_factor × M` swaps within `max_tries_factor × M` attempts,
    /// saturating at `usize::MAX`
    pub fn for_edge_count(
        edge_count: usize,
        swap_factor: usize,
        max_tries_factor: usize,
    ) -> Self {
        Self {
            target_swaps: swap_factor.saturating_mul(edge_count),
            max_attempts: max_tries_factor.saturating_mul(edge_count),
        }
    }
}

/// Swaps achieved by a rewiring run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapReport {
    pub requested: usize,
    pub achieved: usize,
    pub attempts: usize,
}

impl SwapReport {
    pub fn is_complete(&self) -> bool {
        self.achieved >= self.requested
    }

    /// Achieved over requested; 1 when nothing was requested
    pub fn fraction(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.achieved as f64 / self.requested as f64
        }
    }
}

/// Rewiring ran out of attempts before reaching its swap target.
///
/// The graph keeps every swap that did succeed and its degree sequence is
/// unchanged, so callers may carry on with a less randomized copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("edge rewiring stopped after {attempts} attempts with {achieved} of {requested} swaps")]
pub struct RewireShortfall {
    pub requested: usize,
    pub achieved: usize,
    pub attempts: usize,
}

impl RewireShortfall {
    pub fn report(&self) -> SwapReport {
        SwapReport {
            requested: self.requested,
            achieved: self.achieved,
            attempts: self.attempts,
        }
    }
}

fn key(u: u32, v: u32) -> (u32, u32) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Randomize `graph` in place with double edge swaps.
///
/// Each attempt picks two distinct edges `(a, b)` and `(c, d)` uniformly,
/// orients the second at random, and replaces them with `(a, d)` and
/// `(c, b)` unless that would create a self-loop or a duplicate edge.
/// Self-loops are never picked. Every node keeps its degree.
pub fn double_edge_swap<R: Rng + ?Sized>(
    graph: &mut CompressedGraph,
    budget: SwapBudget,
    rng: &mut R,
) -> Result<SwapReport, RewireShortfall> {
    let mut edges: Vec<(u32, u32)> = graph.simple_edges().collect();
    let requested = budget.target_swaps;

    if requested == 0 {
        return Ok(SwapReport::default());
    }

    if graph.node_count < 4 || edges.len() < 2 {
        return Err(RewireShortfall {
            requested,
            achieved: 0,
            attempts: 0,
        });
    }

    let mut present: HashSet<(u32, u32)> = edges.iter().copied().collect();
    let mut achieved = 0;
    let mut attempts = 0;

    while achieved < requested && attempts < budget.max_attempts {
        attempts += 1;

        let i = rng.gen_range(0..edges.len());
        let j = rng.gen_range(0..edges.len());
        if i == j {
            continue;
        }

        let (a, b) = edges[i];
        let (c, d) = if rng.gen_bool(0.5) {
            edges[j]
        } else {
            (edges[j].1, edges[j].0)
        };

        if a == d || c == b {
            continue;
        }

        let first = key(a, d);
        let second = key(c, b);
        if present.contains(&first) || present.contains(&second) {
            continue;
        }

        present.remove(&key(a, b));
        present.remove(&key(c, d));
        present.insert(first);
        present.insert(second);
        edges[i] = first;
        edges[j] = second;
        achieved += 1;
    }

    let self_loops = std::mem::take(&mut graph.self_loops);
    *graph = CompressedGraph::from_edges(graph.node_ids.clone(), &edges, self_loops);

    if achieved < requested {
        return Err(RewireShortfall {
            requested,
            achieved,
            attempts,
        });
    }

    Ok(SwapReport {
        requested,
        achieved,
        attempts,
    })
}
