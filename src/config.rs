//! Configuration management for the small-world analyzer

use crate::error::AnalysisError;

/// Parameters of a small-world analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of degree-preserving null-model trials (K)
    pub trials: usize,

    /// Largest LCC size for which path lengths are computed exactly
    pub exact_threshold: usize,

    /// BFS sources sampled for the observed path length above the threshold
    pub observed_sources: usize,

    /// BFS sources sampled per null-model trial
    pub null_sources: usize,

    /// Successful swaps requested per edge
    pub swap_factor: usize,

    /// Swap attempts allowed per edge
    pub max_tries_factor: usize,

    /// Seed for every random draw; `None` seeds from entropy
    pub seed: Option<u64>,

    /// p-values below this are reported as significant
    pub significance_level: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trials: 300,
            exact_threshold: 5_000,
            observed_sources: 1_000,
            null_sources: 500,
            swap_factor: 3,
            max_tries_factor: 10,
            seed: None,
            significance_level: 0.05,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with the given trial count and seed, other
    /// values at their defaults
    pub fn new(trials: usize, seed: Option<u64>) -> Self {
        Self {
            trials,
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |reason: &str| {
            Err(AnalysisError::InvalidConfig {
                reason: reason.to_string(),
            })
        };

        if self.trials == 0 {
            return invalid("trials must be at least 1");
        }
        if self.observed_sources == 0 {
            return invalid("observed_sources must be at least 1");
        }
        if self.null_sources == 0 {
            return invalid("null_sources must be at least 1");
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return invalid("significance_level must lie in (0, 1)");
        }

        Ok(())
    }
}
