//! Core library functions for the small-world analyzer

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod null_model;
pub mod pipeline;
pub mod stats;
pub mod storage;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use pipeline::{analyze_feed, analyze_graph, analyze_with_rng, StatisticsRecord};
