//! Graph construction module

use std::collections::HashMap;
use std::sync::Arc;

use crate::data::{EdgeFeed, EdgeRecord};
use crate::graph::CompressedGraph;

/// Builder for incrementally constructing an undirected CompressedGraph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs, in first-seen order
    node_ids: Vec<String>,

    /// Adjacency lists for each node (may hold duplicates until build)
    adjacency_lists: Vec<Vec<u32>>,

    /// Self-loop flags
    self_loops: Vec<bool>,

    /// Records dropped for a missing endpoint
    skipped_edges: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            self_loops: Vec::with_capacity(capacity),
            skipped_edges: 0,
        }
    }

    /// Create a builder already populated with every edge of a feed
    pub fn from_feed(feed: &EdgeFeed) -> Self {
        let mut builder = Self::with_capacity(feed.record_count());
        for record in feed.records() {
            builder.add_record(record);
        }

        if builder.skipped_edges > 0 {
            log::warn!(
                "Skipped {} edge records with a missing endpoint",
                builder.skipped_edges
            );
        }

        builder
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        self.self_loops.push(false);

        idx
    }

    /// Add an undirected edge between two nodes
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let a_idx = self.get_or_create_node(a);
        let b_idx = self.get_or_create_node(b);

        if a_idx == b_idx {
            self.self_loops[a_idx as usize] = true;
            return;
        }

        self.adjacency_lists[a_idx as usize].push(b_idx);
        self.adjacency_lists[b_idx as usize].push(a_idx);
    }

    /// Add a feed record, returning false if it was skipped
    pub fn add_record(&mut self, record: &EdgeRecord) -> bool {
        match record.endpoints() {
            Some((from, to)) => {
                self.add_edge(&from, &to);
                true
            }
            None => {
                self.skipped_edges += 1;
                false
            }
        }
    }

    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    /// Build the compressed graph
    pub fn build(self) -> CompressedGraph {
        let node_ids: Arc<[String]> = self.node_ids.into();
        let graph =
            CompressedGraph::from_adjacency(node_ids, self.adjacency_lists, self.self_loops);

        log::debug!(
            "Built graph with {} nodes, {} edges ({} bytes of adjacency)",
            graph.node_count,
            graph.edge_count(),
            graph.memory_usage()
        );

        graph
    }
}
