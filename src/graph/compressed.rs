//! Memory-efficient undirected graph representation

use std::mem;
use std::sync::Arc;

/// Node ID table shared between a graph and every graph derived from it.
///
/// Subgraphs keep a map from their local indices into the parent's names
/// instead of copying the strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIds {
    names: Arc<[String]>,
    members: Option<Arc<[u32]>>,
}

impl NodeIds {
    pub fn new(names: Arc<[String]>) -> Self {
        Self {
            names,
            members: None,
        }
    }

    /// Number of local nodes
    pub fn len(&self) -> usize {
        self.members.as_ref().map_or(self.names.len(), |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, node: usize) -> &str {
        match &self.members {
            Some(members) => &self.names[members[node] as usize],
            None => &self.names[node],
        }
    }

    /// Local index of `id`, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        (0..self.len()).find(|&node| self.get(node) == id)
    }

    /// IDs of `members` (local indices), sharing this table's names
    pub fn subset(&self, members: &[u32]) -> Self {
        let mapped: Arc<[u32]> = match &self.members {
            Some(outer) => members.iter().map(|&m| outer[m as usize]).collect(),
            None => members.into(),
        };
        Self {
            names: Arc::clone(&self.names),
            members: Some(mapped),
        }
    }

    /// Whether both tables point at the same name allocation
    pub fn shares_names_with(&self, other: &NodeIds) -> bool {
        Arc::ptr_eq(&self.names, &other.names)
    }
}

impl From<Arc<[String]>> for NodeIds {
    fn from(names: Arc<[String]>) -> Self {
        Self::new(names)
    }
}

/// Compressed sparse representation of an undirected simple graph.
///
/// Every edge `{u, v}` with `u != v` is stored twice, once in each endpoint's
/// neighbor list, and each list is sorted and free of duplicates. Self-loops
/// never enter the adjacency arrays; they are tracked per node so they still
/// count towards degree and edge totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated, sorted neighbor lists
    pub neighbors: Vec<u32>,

    /// Whether each node carries a self-loop
    pub self_loops: Vec<bool>,

    /// Original string IDs, shared with rewired copies and subgraphs
    pub node_ids: NodeIds,
}

impl CompressedGraph {
    /// Build a graph from per-node neighbor lists.
    ///
    /// Lists are sorted and deduplicated; entries pointing back at their own
    /// node are dropped (use `self_loops` for those). The caller is
    /// responsible for symmetry.
    pub fn from_adjacency(
        node_ids: impl Into<NodeIds>,
        mut adjacency: Vec<Vec<u32>>,
        self_loops: Vec<bool>,
    ) -> Self {
        let node_ids = node_ids.into();
        let node_count = node_ids.len();
        debug_assert_eq!(adjacency.len(), node_count);
        debug_assert_eq!(self_loops.len(), node_count);

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut offset = 0u32;
        for (node, list) in adjacency.iter_mut().enumerate() {
            list.retain(|&n| n as usize != node);
            list.sort_unstable();
            list.dedup();
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut neighbors = Vec::with_capacity(offset as usize);
        for list in &adjacency {
            neighbors.extend_from_slice(list);
        }

        Self {
            node_count,
            offsets,
            neighbors,
            self_loops,
            node_ids,
        }
    }

    /// Build a graph from a list of distinct non-loop edges.
    pub fn from_edges(
        node_ids: impl Into<NodeIds>,
        edges: &[(u32, u32)],
        self_loops: Vec<bool>,
    ) -> Self {
        let node_ids = node_ids.into();
        let mut adjacency = vec![Vec::new(); node_ids.len()];
        for &(u, v) in edges {
            adjacency[u as usize].push(v);
            adjacency[v as usize].push(u);
        }
        Self::from_adjacency(node_ids, adjacency, self_loops)
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Neighbors of a node, sorted ascending, excluding the node itself
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Check if `u` and `v` are adjacent
    pub fn has_edge(&self, u: usize, v: u32) -> bool {
        if u == v as usize {
            return self.self_loops[u];
        }
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Degree of a node; a self-loop adds two
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        let loops = if self.self_loops[node] { 2 } else { 0 };
        end - start + loops
    }

    pub fn degree_sequence(&self) -> Vec<usize> {
        (0..self.node_count).map(|node| self.degree(node)).collect()
    }

    pub fn self_loop_count(&self) -> usize {
        self.self_loops.iter().filter(|&&l| l).count()
    }

    /// Number of distinct edges, self-loops included
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2 + self.self_loop_count()
    }

    /// Every non-loop edge once, as `(u, v)` with `u < v`
    pub fn simple_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.node_count).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .filter(move |&&v| (u as u32) < v)
                .map(move |&v| (u as u32, v))
        })
    }

    pub fn node_id(&self, node: usize) -> &str {
        self.node_ids.get(node)
    }

    /// Average degree `2M / N`, zero for an empty graph
    pub fn average_degree(&self) -> f64 {
        if self.node_count == 0 {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / self.node_count as f64
    }

    /// Estimate memory usage in bytes, excluding the shared ID table
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let neighbors = self.neighbors.capacity() * mem::size_of::<u32>();
        let loops = self.self_loops.capacity() * mem::size_of::<bool>();

        base + offsets + neighbors + loops
    }
}
