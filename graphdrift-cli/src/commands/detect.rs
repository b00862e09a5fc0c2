use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;

use graphdrift_core::config::{DriftConfig, ParseErrorPolicy};
use graphdrift_core::dataset::dataset_name;
use graphdrift_core::pipeline::{DetectionReport, DriftPipeline};
use graphdrift_core::progress::{IndicatifReporter, NoopReporter, ProgressReporter};
use graphdrift_core::render::all_renderers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Directory of edge-list snapshots named `<n>_*.txt`
    pub dataset: PathBuf,

    /// Config file (TOML)
    #[arg(long, env = "GRAPHDRIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fingerprint length in bits
    #[arg(long)]
    pub bits: Option<usize>,

    /// PageRank damping factor
    #[arg(long)]
    pub damping: Option<f64>,

    /// Moving ranges below the median for the anomaly bound
    #[arg(long)]
    pub multiplier: Option<f64>,

    /// Consecutive sub-threshold similarities that confirm an anomaly
    #[arg(long)]
    pub window: Option<usize>,

    /// Only use files matching this glob pattern
    #[arg(long)]
    pub pattern: Option<String>,

    /// Skip malformed snapshots instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Worker threads for fingerprinting (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write the text report, similarity CSV and JSON report into this directory
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DetectArgs {
    fn apply_overrides(&self, config: &mut DriftConfig) {
        if let Some(bits) = self.bits {
            config.fingerprint.bits = bits;
        }
        if let Some(damping) = self.damping {
            config.centrality.damping = damping;
        }
        if let Some(multiplier) = self.multiplier {
            config.threshold.multiplier = multiplier;
        }
        if let Some(window) = self.window {
            config.detection.window = window;
        }
        if let Some(pattern) = &self.pattern {
            config.dataset.pattern.clone_from(pattern);
        }
        if self.skip_invalid {
            config.dataset.on_parse_error = ParseErrorPolicy::Skip;
        }
    }
}

pub fn run(args: &DetectArgs, quiet: bool) -> anyhow::Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    let pipeline = DriftPipeline::new(config).context("Invalid config")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Cannot configure worker threads")?;
    }

    let progress: Box<dyn ProgressReporter> = if quiet || args.format == OutputFormat::Json {
        Box::new(NoopReporter)
    } else {
        Box::new(IndicatifReporter::new())
    };

    let report = pipeline
        .run_dir(&args.dataset, progress.as_ref())
        .context("Detection failed")?;

    if let Some(dir) = &args.output {
        let prefix = dataset_name(&args.dataset);
        for renderer in all_renderers() {
            let path = renderer
                .write(&report, dir, &prefix)
                .with_context(|| format!("Cannot write {} report", renderer.name()))?;
            info!(path = %path.display(), "Wrote {}", renderer.name());
        }
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if !quiet {
                print_summary(args, &report);
            }
        }
    }

    Ok(())
}

fn print_summary(args: &DetectArgs, report: &DetectionReport) {
    println!(
        "Dataset:      {} ({} snapshots)",
        args.dataset.display(),
        report.snapshots.len()
    );
    if let Some(t) = report.threshold {
        println!("  Median:       {:.4}", t.median);
        println!("  Moving range: {:.4}", t.moving_range);
        println!("  Lower bound:  {:.4}", t.lower_bound);
    }
    println!("  Anomalies:    {}", report.anomaly_count());
    for (rank, anomaly) in report.anomalies.iter().enumerate() {
        println!(
            "    {}: {} ({}, distance {:.4})",
            rank + 1,
            anomaly.snapshot_index,
            report.label(anomaly.snapshot_index).unwrap_or("?"),
            anomaly.distance
        );
    }
    println!("  Duration:     {:.2?}", report.duration);

    if !report.skipped.is_empty() {
        println!();
        println!("  Skipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("    - {}: {}", skipped.label, skipped.reason);
        }
    }
    if !report.warnings.is_empty() {
        println!();
        println!("  Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("    - {warning}");
        }
    }
}
