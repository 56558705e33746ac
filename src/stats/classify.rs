//! Small-world classification via the sigma ratio

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why sigma could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    ZeroNullClustering,
    ZeroNullPathLength,
    ZeroObservedPathLength,
    NonFinite,
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ZeroNullClustering => "null-model mean clustering is zero",
            Self::ZeroNullPathLength => "null-model mean path length is zero",
            Self::ZeroObservedPathLength => "observed path length is zero",
            Self::NonFinite => "sigma is not a finite number",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    SmallWorld,
    NotSmallWorld,
    Indeterminate(IndeterminateReason),
}

impl Verdict {
    /// Small-world iff sigma is strictly greater than one
    pub fn from_sigma(sigma: f64) -> Self {
        if !sigma.is_finite() {
            Self::Indeterminate(IndeterminateReason::NonFinite)
        } else if sigma > 1.0 {
            Self::SmallWorld
        } else {
            Self::NotSmallWorld
        }
    }

    pub fn is_small_world(&self) -> bool {
        matches!(self, Self::SmallWorld)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallWorld => f.write_str("SMALL-WORLD"),
            Self::NotSmallWorld => f.write_str("NOT SMALL-WORLD"),
            Self::Indeterminate(reason) => write!(f, "INDETERMINATE ({reason})"),
        }
    }
}

/// Sigma with its verdict and the two normalized ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// `C_obs / mean(C_rand)`
    pub clustering_ratio: Option<f64>,
    /// `L_obs / mean(L_rand)`
    pub path_length_ratio: Option<f64>,
    pub sigma: Option<f64>,
    pub verdict: Verdict,
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// Compute `sigma = (C_obs / C_rand) / (L_obs / L_rand)` and classify it.
///
/// A zero (or non-finite) denominator anywhere yields an indeterminate
/// verdict with no sigma.
pub fn classify(
    observed_clustering: f64,
    null_clustering: f64,
    observed_path_length: f64,
    null_path_length: f64,
) -> Classification {
    let clustering_ratio =
        is_positive(null_clustering).then(|| observed_clustering / null_clustering);
    let path_length_ratio =
        is_positive(null_path_length).then(|| observed_path_length / null_path_length);

    let indeterminate = |reason| Classification {
        clustering_ratio,
        path_length_ratio,
        sigma: None,
        verdict: Verdict::Indeterminate(reason),
    };

    let (Some(c_ratio), Some(l_ratio)) = (clustering_ratio, path_length_ratio) else {
        let reason = if clustering_ratio.is_none() {
            IndeterminateReason::ZeroNullClustering
        } else {
            IndeterminateReason::ZeroNullPathLength
        };
        return indeterminate(reason);
    };

    if !is_positive(l_ratio) {
        return indeterminate(IndeterminateReason::ZeroObservedPathLength);
    }

    let sigma = c_ratio / l_ratio;
    match Verdict::from_sigma(sigma) {
        Verdict::Indeterminate(reason) => indeterminate(reason),
        verdict => Classification {
            clustering_ratio,
            path_length_ratio,
            sigma: Some(sigma),
            verdict,
        },
    }
}
