//! Input data handling

pub mod feed;

pub use feed::{load_feed, EdgeFeed, EdgeRecord};
