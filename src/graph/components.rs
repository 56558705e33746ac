//! Connected component detection and subgraph extraction

use std::collections::HashMap;

use crate::error::AnalysisError;
use crate::graph::CompressedGraph;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        let (big, small) = if self.size[root_x as usize] >= self.size[root_y as usize] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Partition the graph into connected components.
///
/// Components are listed in order of their lowest node index and members are
/// sorted ascending.
pub fn connected_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(graph.node_count);
    for (u, v) in graph.simple_edges() {
        sets.union(u, v);
    }

    let mut root_to_component: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();

    for node in 0..graph.node_count as u32 {
        let root = sets.find(node);
        let slot = *root_to_component.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}

/// Members of the largest connected component.
///
/// Ties go to the component enumerated first. Fails only on an empty graph.
pub fn largest_component(graph: &CompressedGraph) -> Result<Vec<u32>, AnalysisError> {
    let mut largest: Option<Vec<u32>> = None;
    for component in connected_components(graph) {
        if largest.as_ref().map_or(true, |best| component.len() > best.len()) {
            largest = Some(component);
        }
    }

    largest.ok_or(AnalysisError::EmptyGraph)
}

/// Subgraph induced by `members`, re-indexed in the order given.
///
/// Node IDs (shared with the parent, not copied) and self-loop flags carry
/// over; edges leaving the member set are dropped.
pub fn induced_subgraph(graph: &CompressedGraph, members: &[u32]) -> CompressedGraph {
    // Mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    for (sub_idx, &node) in members.iter().enumerate() {
        orig_to_sub[node as usize] = sub_idx as u32;
    }

    let adjacency: Vec<Vec<u32>> = members
        .iter()
        .map(|&node| {
            graph
                .neighbors(node as usize)
                .iter()
                .map(|&target| orig_to_sub[target as usize])
                .filter(|&target| target != u32::MAX)
                .collect()
        })
        .collect();

    let node_ids = graph.node_ids.subset(members);
    let self_loops = members
        .iter()
        .map(|&node| graph.self_loops[node as usize])
        .collect();

    CompressedGraph::from_adjacency(node_ids, adjacency, self_loops)
}

/// Extract the largest connected component as its own graph
pub fn largest_component_subgraph(
    graph: &CompressedGraph,
) -> Result<CompressedGraph, AnalysisError> {
    let members = largest_component(graph)?;
    Ok(induced_subgraph(graph, &members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;
    use std::sync::Arc;

    fn graph_from(n: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        let ids: Arc<[String]> = (0..n).map(|i| format!("n{i}")).collect();
        CompressedGraph::from_edges(ids, edges, vec![false; n])
    }

    #[test]
    fn disjoint_sets_track_sizes() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);

        assert_eq!(sets.size(0), 4);
        assert_eq!(sets.size(2), 1);
        assert_eq!(sets.find(3), sets.find(0));
    }

    #[test]
    fn picks_largest_component() {
        let graph = graph_from(7, &[(0, 1), (2, 3), (3, 4), (4, 2), (5, 6)]);

        assert_eq!(connected_components(&graph).len(), 3);
        assert_eq!(largest_component(&graph).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn ties_go_to_first_component() {
        let graph = graph_from(4, &[(0, 1), (2, 3)]);
        assert_eq!(largest_component(&graph).unwrap(), vec![0, 1]);
    }

    #[test]
    fn empty_graph_has_no_component() {
        let graph = graph_from(0, &[]);
        assert_eq!(largest_component(&graph), Err(AnalysisError::EmptyGraph));
    }

    #[test]
    fn induced_subgraph_keeps_internal_edges_only() {
        let graph = graph_from(6, &[(0, 1), (1, 2), (2, 0), (2, 3), (4, 5)]);
        let sub = induced_subgraph(&graph, &[0, 1, 2]);

        assert_eq!(sub.node_count, 3);
        assert_eq!(sub.edge_count(), 3);
        let ids: Vec<_> = (0..3).map(|i| sub.node_id(i)).collect();
        assert_eq!(ids, vec!["n0", "n1", "n2"]);
        assert_eq!(sub.degree_sequence(), vec![2, 2, 2]);
    }

    #[test]
    fn component_subgraph_shares_parent_ids() {
        let graph = graph_from(7, &[(5, 6), (1, 3), (3, 4), (4, 1)]);
        let lcc = largest_component_subgraph(&graph).unwrap();

        assert!(lcc.node_ids.shares_names_with(&graph.node_ids));
        let ids: Vec<_> = (0..lcc.node_count).map(|i| lcc.node_id(i)).collect();
        assert_eq!(ids, vec!["n1", "n3", "n4"]);

        // A second extraction from the subgraph still resolves to the root names
        let inner = induced_subgraph(&lcc, &[2]);
        assert!(inner.node_ids.shares_names_with(&graph.node_ids));
        assert_eq!(inner.node_id(0), "n4");
    }

    #[test]
    fn component_count_matches_petgraph() {
        let edges = [(0, 1), (1, 2), (3, 4), (5, 6), (6, 7), (7, 5), (9, 10)];
        let graph = graph_from(12, &edges);

        let mut oracle = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..12).map(|_| oracle.add_node(())).collect();
        for &(u, v) in &edges {
            oracle.add_edge(nodes[u as usize], nodes[v as usize], ());
        }

        assert_eq!(
            connected_components(&graph).len(),
            petgraph::algo::connected_components(&oracle)
        );
    }
}
