//! Results persistence module

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::to_string_pretty;

use crate::pipeline::StatisticsRecord;

fn significance_tag(significant: bool) -> &'static str {
    if significant {
        "(sig.)"
    } else {
        "(n.s.)"
    }
}

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |r| format!("{r:.2}x"))
}

/// Render the plain-text small-world report
pub fn render_report(record: &StatisticsRecord) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_sections(&mut out, record);
    out
}

fn write_sections(out: &mut String, record: &StatisticsRecord) -> std::fmt::Result {
    let paths = &record.observed_path_length;
    let c_rand = &record.null_clustering;
    let l_rand = &record.null_path_length;
    let class = &record.classification;

    writeln!(out, "NETWORK STATISTICS")?;
    writeln!(out, "Number of nodes (N) = {}", record.node_count)?;
    writeln!(out, "Number of edges (M) = {}", record.edge_count)?;
    writeln!(out, "Average degree (k) = {:.4}", record.average_degree)?;
    writeln!(
        out,
        "LCC = {} ({:.1}%)",
        record.lcc_size,
        record.lcc_fraction * 100.0
    )?;
    if record.skipped_edges > 0 {
        writeln!(out, "Skipped edge records = {}", record.skipped_edges)?;
    }
    writeln!(out)?;

    writeln!(out, "OBSERVED METRICS")?;
    writeln!(out, "C_obs = {:.6}", record.observed_clustering)?;
    writeln!(
        out,
        "L_obs = {:.4} ({})",
        paths.mean,
        if paths.exact { "exact" } else { "sampled" }
    )?;
    writeln!(out, "L_min = {}", paths.min)?;
    writeln!(out, "L_max = {}", paths.max)?;
    match record.diameter {
        Some(diameter) => writeln!(out, "Diameter = {diameter}")?,
        None => writeln!(out, "Diameter >= {} (lower bound from sampled sources)", paths.max)?,
    }
    writeln!(out)?;

    writeln!(out, "NULL MODEL (Degree-preserving, K={})", record.trials)?;
    writeln!(
        out,
        "C_rand = {:.6} ± {:.6} [{:.6}, {:.6}]",
        c_rand.mean, c_rand.std_dev, c_rand.lower, c_rand.upper
    )?;
    writeln!(
        out,
        "L_rand = {:.4} ± {:.4} [{:.4}, {:.4}]",
        l_rand.mean, l_rand.std_dev, l_rand.lower, l_rand.upper
    )?;
    if record.under_randomized_trials > 0 {
        writeln!(
            out,
            "Under-randomized trials = {} (mean swap completion {:.1}%)",
            record.under_randomized_trials,
            record.mean_swap_fraction * 100.0
        )?;
    }
    writeln!(out)?;

    writeln!(out, "STATISTICAL TESTS")?;
    writeln!(
        out,
        "p(C) = {:.4} {}",
        record.clustering_test.p_value,
        significance_tag(record.clustering_test.significant)
    )?;
    writeln!(
        out,
        "p(L) = {:.4} {}",
        record.path_length_test.p_value,
        significance_tag(record.path_length_test.significant)
    )?;
    writeln!(out)?;

    writeln!(out, "RESULT")?;
    writeln!(out, "C_obs/C_rand = {}", ratio(class.clustering_ratio))?;
    writeln!(out, "L_obs/L_rand = {}", ratio(class.path_length_ratio))?;
    writeln!(out)?;
    match class.sigma {
        Some(sigma) => writeln!(out, "sigma = {sigma:.4} => {}", class.verdict)?,
        None => writeln!(out, "sigma = undefined => {}", class.verdict)?,
    }

    Ok(())
}

/// Write the text report, creating parent directories as needed
pub fn write_report(record: &StatisticsRecord, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    log::info!("Writing report to {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(render_report(record).as_bytes())?;

    Ok(())
}

/// Write the full record as pretty-printed JSON
pub fn write_json(record: &StatisticsRecord, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    log::info!("Writing statistics record to {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(to_string_pretty(record)?.as_bytes())?;

    Ok(())
}
