//! Error types for the small-world analysis

use thiserror::Error;

/// Conditions that abort an analysis
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No node survived graph construction, so there is no component to measure
    #[error("graph is empty: no nodes were built from the input feed")]
    EmptyGraph,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
