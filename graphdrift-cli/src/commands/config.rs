use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use graphdrift_core::config::DriftConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Validate and print this config file instead of the defaults
    #[arg(long)]
    pub check: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let config = match &args.check {
        Some(path) => super::load_config(Some(path))?,
        None => DriftConfig::default(),
    };
    let text = config
        .to_toml_string()
        .context("Cannot serialize config")?;
    print!("{text}");
    Ok(())
}
