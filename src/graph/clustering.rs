//! Local clustering coefficients

use rayon::prelude::*;

use crate::graph::CompressedGraph;

/// Number of common entries in two sorted slices
fn sorted_intersection_count(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Fraction of a node's neighbor pairs that are themselves adjacent.
///
/// Self-loops play no part; a node with fewer than two neighbors scores 0.
pub fn local_clustering(graph: &CompressedGraph, node: usize) -> f64 {
    let neighbors = graph.neighbors(node);
    let degree = neighbors.len();
    if degree < 2 {
        return 0.0;
    }

    // Each triangle through `node` is seen once from each of its two other corners
    let links: usize = neighbors
        .iter()
        .map(|&n| sorted_intersection_count(neighbors, graph.neighbors(n as usize)))
        .sum();
    let triangles = links / 2;

    let possible = degree * (degree - 1) / 2;
    triangles as f64 / possible as f64
}

/// Mean local clustering coefficient over every node of the graph
pub fn average_clustering(graph: &CompressedGraph) -> f64 {
    if graph.node_count == 0 {
        return 0.0;
    }

    // Collected in node order so the sum does not depend on scheduling
    let coefficients: Vec<f64> = (0..graph.node_count)
        .into_par_iter()
        .map(|node| local_clustering(graph, node))
        .collect();

    coefficients.iter().sum::<f64>() / graph.node_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;

    fn graph_from(n: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        let ids: Arc<[String]> = (0..n).map(|i| i.to_string()).collect();
        CompressedGraph::from_edges(ids, edges, vec![false; n])
    }

    fn complete(n: u32) -> CompressedGraph {
        let edges: Vec<_> = (0..n)
            .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
            .collect();
        graph_from(n as usize, &edges)
    }

    #[rstest]
    #[case(3)]
    #[case(4)]
    #[case(7)]
    #[case(25)]
    fn complete_graph_is_fully_clustered(#[case] n: u32) {
        assert!((average_clustering(&complete(n)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_edges_have_no_clustering() {
        let graph = graph_from(8, &[(0, 1), (2, 3), (4, 5), (6, 7)]);
        assert_eq!(average_clustering(&graph), 0.0);
    }

    #[test]
    fn triangle_with_pendant() {
        // 0-1-2 triangle, 3 hangs off 2
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);

        assert_eq!(local_clustering(&graph, 0), 1.0);
        assert!((local_clustering(&graph, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(local_clustering(&graph, 3), 0.0);
        assert!((average_clustering(&graph) - (1.0 + 1.0 + 1.0 / 3.0) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn ring_lattice_with_four_neighbors_scores_one_half() {
        let n = 20u32;
        let edges: Vec<_> = (0..n)
            .flat_map(|i| [(i, (i + 1) % n), (i, (i + 2) % n)])
            .collect();
        let graph = graph_from(n as usize, &edges);

        assert!((average_clustering(&graph) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn self_loops_do_not_change_clustering() {
        let ids: Arc<[String]> = (0..3).map(|i| i.to_string()).collect();
        let loops = vec![true, false, false];
        let graph = CompressedGraph::from_edges(ids, &[(0, 1), (1, 2), (2, 0)], loops);

        assert_eq!(average_clustering(&graph), 1.0);
    }

    #[test]
    fn empty_graph_scores_zero() {
        assert_eq!(average_clustering(&graph_from(0, &[])), 0.0);
    }
}
