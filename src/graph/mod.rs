//! Graph representation and algorithms module

pub mod builder;
pub mod clustering;
pub mod components;
pub mod compressed;
pub mod paths;

pub use builder::GraphBuilder;
pub use compressed::{CompressedGraph, NodeIds};
pub use paths::PathLengthStats;
