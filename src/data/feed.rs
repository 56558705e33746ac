//! Knowledge-graph JSON feed handling

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One relation entry. Only the endpoints are read; type, properties and any
/// other keys on the record are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(default)]
    pub from: Option<Value>,

    #[serde(default)]
    pub to: Option<Value>,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(Value::String(from.into())),
            to: Some(Value::String(to.into())),
        }
    }

    /// Both endpoints as node IDs, or `None` if either is missing
    pub fn endpoints(&self) -> Option<(String, String)> {
        let from = node_id(self.from.as_ref()?)?;
        let to = node_id(self.to.as_ref()?)?;
        Some((from, to))
    }
}

/// Node ID for an endpoint value. Strings are taken as-is, other scalars are
/// stringified; `null`, empty strings and containers count as missing.
fn node_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Edge collection grouped by relation label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeFeed {
    #[serde(default)]
    pub edges: BTreeMap<String, Vec<EdgeRecord>>,
}

impl EdgeFeed {
    /// Add one edge under a relation label
    pub fn push(&mut self, relation: &str, record: EdgeRecord) {
        self.edges.entry(relation.to_string()).or_default().push(record);
    }

    /// Iterate over every record, across all relations
    pub fn records(&self) -> impl Iterator<Item = &EdgeRecord> + '_ {
        self.edges.values().flatten()
    }

    pub fn record_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Parse a knowledge-graph document. A document without an `edges`
    /// object yields an empty feed.
    ///
    /// Malformed parts are tolerated: a relation whose value is not an array
    /// is dropped, and an entry that is not an object becomes a record with
    /// no endpoints so the graph builder counts it as skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json).context("feed is not valid JSON")?;

        let relations = match document.get("edges") {
            Some(Value::Object(relations)) => relations,
            Some(_) => {
                log::warn!("`edges` is not an object; treating feed as empty");
                return Ok(Self::default());
            }
            None => {
                log::warn!("Feed has no `edges` section");
                return Ok(Self::default());
            }
        };

        let mut edges = BTreeMap::new();
        for (relation, entries) in relations {
            let Value::Array(entries) = entries else {
                log::warn!("Relation `{}` is not an array of edges; skipping it", relation);
                continue;
            };

            let records = entries.iter().map(edge_record).collect();
            edges.insert(relation.clone(), records);
        }

        Ok(Self { edges })
    }
}

/// Record for one relation entry; anything but an object has no endpoints
fn edge_record(entry: &Value) -> EdgeRecord {
    match entry {
        Value::Object(_) => serde_json::from_value(entry.clone()).unwrap_or_default(),
        _ => EdgeRecord::default(),
    }
}

/// Load a knowledge-graph feed from a JSON file
pub fn load_feed(path: impl AsRef<Path>) -> Result<EdgeFeed> {
    let path = path.as_ref();
    log::info!("Reading knowledge graph: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let feed = EdgeFeed::from_json_str(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    log::info!(
        "Loaded {} edge records across {} relation types",
        feed.record_count(),
        feed.edges.len()
    );

    Ok(feed)
}
