use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use graphdrift_core::fingerprint::similarity;
use graphdrift_core::graph::SnapshotGraph;
use graphdrift_core::pipeline::Fingerprinter;

#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Edge-list files, in chronological order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (TOML)
    #[arg(long, env = "GRAPHDRIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fingerprint length in bits
    #[arg(long)]
    pub bits: Option<usize>,

    /// PageRank damping factor
    #[arg(long)]
    pub damping: Option<f64>,

    /// Print fingerprints as bit strings instead of hex
    #[arg(long)]
    pub binary: bool,
}

pub fn run(args: &FingerprintArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(bits) = args.bits {
        config.fingerprint.bits = bits;
    }
    if let Some(damping) = args.damping {
        config.centrality.damping = damping;
    }
    config.validate().context("Invalid config")?;

    let fingerprinter = Fingerprinter::new(&config);
    let mut previous = None;

    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read snapshot: {}", path.display()))?;
        let graph = SnapshotGraph::parse(&text)
            .with_context(|| format!("Snapshot {}: parse error", path.display()))?;
        let fp = fingerprinter.fingerprint_graph(&graph);

        let shown = if args.binary { fp.to_bit_string() } else { fp.to_hex() };
        match &previous {
            Some(prev) => {
                let sim = similarity(prev, &fp)?;
                println!("{shown}  {}  similarity={sim:.4}", path.display());
            }
            None => println!("{shown}  {}", path.display()),
        }
        previous = Some(fp);
    }

    Ok(())
}
