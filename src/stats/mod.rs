//! Statistical comparison of observed metrics with the null ensemble

pub mod classify;
pub mod summary;

pub use classify::{classify, Classification, IndeterminateReason, Verdict};
pub use summary::{aggregate, NullComparison, NullDistribution, SignificanceTest};
