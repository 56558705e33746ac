use anyhow::Result;
use clap::Parser;

use small_world_analyzer::{data, pipeline, storage, AnalysisConfig};

#[derive(Parser, Debug)]
#[clap(
    name = "small-world-analyzer",
    about = "Small-world analysis of a knowledge graph against degree-preserving null models"
)]
struct Cli {
    /// Path to the knowledge graph JSON file
    #[clap(long)]
    input: String,

    /// Path of the text report
    #[clap(long, default_value = "results/small_world_results.txt")]
    output: String,

    /// Optional path for the statistics record as JSON
    #[clap(long)]
    json: Option<String>,

    /// Number of null-model trials (K)
    #[clap(long, default_value = "300")]
    trials: usize,

    /// Largest LCC size for exact all-pairs path lengths
    #[clap(long, default_value = "5000")]
    exact_threshold: usize,

    /// BFS sources sampled for the observed path length on large graphs
    #[clap(long, default_value = "1000")]
    observed_sources: usize,

    /// BFS sources sampled per null-model trial
    #[clap(long, default_value = "500")]
    null_sources: usize,

    /// Successful edge swaps requested per edge
    #[clap(long, default_value = "3")]
    swap_factor: usize,

    /// Edge swap attempts allowed per edge
    #[clap(long, default_value = "10")]
    max_tries_factor: usize,

    /// Significance level for the empirical p-values
    #[clap(long, default_value = "0.05")]
    significance_level: f64,

    /// Random seed for a reproducible run
    #[clap(long)]
    seed: Option<u64>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            trials: self.trials,
            exact_threshold: self.exact_threshold,
            observed_sources: self.observed_sources,
            null_sources: self.null_sources,
            swap_factor: self.swap_factor,
            max_tries_factor: self.max_tries_factor,
            seed: self.seed,
            significance_level: self.significance_level,
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // If threads = 0, use all available cores
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting small-world analysis");
    log::info!("Input: {}", args.input);

    let config = args.config();
    if let Some(seed) = config.seed {
        log::info!("Seed: {}", seed);
    }

    // 1. Load the edge feed
    let feed = data::load_feed(&args.input)?;

    // 2. Build, measure, compare against null models, classify
    let record = pipeline::analyze_feed(&feed, &config)?;

    // 3. Report
    storage::write_report(&record, &args.output)?;
    if let Some(json) = &args.json {
        storage::write_json(&record, json)?;
    }

    log::info!(
        "Analysis complete: {}. Report saved to {}",
        record.classification.verdict,
        args.output
    );

    Ok(())
}
