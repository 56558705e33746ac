//! Null distribution summaries and empirical significance tests

use serde::{Deserialize, Serialize};

use crate::null_model::NullModelSample;

/// Lower and upper percentiles of the two-sided 95% empirical interval
pub const INTERVAL_PERCENTILES: (f64, f64) = (2.5, 97.5);

/// Mean, population standard deviation and 95% interval of a null metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NullDistribution {
    pub mean: f64,
    pub std_dev: f64,
    pub lower: f64,
    pub upper: f64,
}

impl NullDistribution {
    /// Summarize a set of trial values. An empty set summarizes to zeros.
    pub fn from_values(values: &[f64]) -> Self {
        use statrs::statistics::Statistics;

        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                lower: 0.0,
                upper: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            mean: values.iter().mean(),
            std_dev: values.iter().population_std_dev(),
            lower: percentile(&sorted, INTERVAL_PERCENTILES.0),
            upper: percentile(&sorted, INTERVAL_PERCENTILES.1),
        }
    }
}

/// Percentile `q` (0-100) of sorted data, interpolating linearly between the
/// two closest ranks.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => return f64::NAN,
        1 => return sorted[0],
        _ => {}
    }

    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let weight = rank - below as f64;

    sorted[below] + (sorted[above] - sorted[below]) * weight
}

/// An empirical p-value and whether it clears the significance level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceTest {
    pub p_value: f64,
    pub significant: bool,
}

impl SignificanceTest {
    pub fn new(p_value: f64, significance_level: f64) -> Self {
        Self {
            p_value,
            significant: p_value < significance_level,
        }
    }
}

/// One-sided: share of trials whose clustering is at least the observed value
pub fn clustering_p_value(null_values: &[f64], observed: f64) -> f64 {
    if null_values.is_empty() {
        return 1.0;
    }
    let extreme = null_values.iter().filter(|&&c| c >= observed).count();
    extreme as f64 / null_values.len() as f64
}

/// Two-sided: share of trials deviating from the null mean by at least as
/// much as the observed value does
pub fn path_length_p_value(null_values: &[f64], observed: f64, null_mean: f64) -> f64 {
    if null_values.is_empty() {
        return 1.0;
    }
    let observed_deviation = (observed - null_mean).abs();
    let extreme = null_values
        .iter()
        .filter(|&&l| (l - null_mean).abs() >= observed_deviation)
        .count();
    extreme as f64 / null_values.len() as f64
}

/// Observed metrics set against the null ensemble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NullComparison {
    pub clustering: NullDistribution,
    pub path_length: NullDistribution,
    pub clustering_test: SignificanceTest,
    pub path_length_test: SignificanceTest,
}

/// Reduce the null samples to distributions and significance tests
pub fn aggregate(
    samples: &[NullModelSample],
    observed_clustering: f64,
    observed_path_length: f64,
    significance_level: f64,
) -> NullComparison {
    let clustering_values: Vec<f64> = samples.iter().map(|s| s.clustering).collect();
    let path_values: Vec<f64> = samples.iter().map(|s| s.path_length).collect();

    let clustering = NullDistribution::from_values(&clustering_values);
    let path_length = NullDistribution::from_values(&path_values);

    let p_c = clustering_p_value(&clustering_values, observed_clustering);
    let p_l = path_length_p_value(&path_values, observed_path_length, path_length.mean);

    NullComparison {
        clustering,
        path_length,
        clustering_test: SignificanceTest::new(p_c, significance_level),
        path_length_test: SignificanceTest::new(p_l, significance_level),
    }
}
