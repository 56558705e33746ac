//! Degree-preserving randomized graphs used as the small-world baseline

pub mod ensemble;
pub mod rewire;

pub use ensemble::{generate_null_ensemble, NullModelSample};
pub use rewire::{double_edge_swap, RewireShortfall, SwapBudget, SwapReport};
