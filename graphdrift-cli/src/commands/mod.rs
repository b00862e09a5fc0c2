pub mod config;
pub mod detect;
pub mod fingerprint;

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;

use graphdrift_core::config::DriftConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fingerprint every snapshot in a dataset directory and report anomalies
    Detect(detect::DetectArgs),
    /// Print the fingerprints of edge-list files and their adjacent similarities
    Fingerprint(fingerprint::FingerprintArgs),
    /// Print the default configuration as TOML
    Config(config::ConfigArgs),
}

pub fn run(cmd: Command, quiet: bool) -> anyhow::Result<()> {
    match cmd {
        Command::Detect(args) => detect::run(&args, quiet),
        Command::Fingerprint(args) => fingerprint::run(&args),
        Command::Config(args) => config::run(&args),
    }
}

/// Load the config file if one was given, else defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DriftConfig> {
    match path {
        Some(path) => DriftConfig::from_file(path)
            .with_context(|| format!("Cannot load config: {}", path.display())),
        None => Ok(DriftConfig::default()),
    }
}
