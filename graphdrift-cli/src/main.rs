use clap::Parser;

use graphdrift_core::error::{ConfigError, DatasetError, DriftError, ParseError, RenderError};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "graphdrift",
    version,
    about = "Detect structural anomalies in time-ordered graph snapshots"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Classify an error into an exit code.
///
/// Exit codes:
///   0: success
///   1: general or unknown error
///   2: configuration error
///   3: dataset missing, not a directory, or unordered
///   4: malformed snapshot
///   7: writing report artifacts failed
///
/// The error chain is matched by type first; message text is only consulted
/// when no graphdrift error is found in it.
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(drift) = cause.downcast_ref::<DriftError>() {
            return match drift {
                DriftError::Config(_) => 2,
                DriftError::Dataset(_) => 3,
                DriftError::Parse(_) | DriftError::Snapshot { .. } => 4,
                DriftError::Render(_) => 7,
                DriftError::Fingerprint(_) | DriftError::Analyze(_) => 1,
            };
        }
        if cause.is::<ConfigError>() {
            return 2;
        }
        if cause.is::<DatasetError>() {
            return 3;
        }
        if cause.is::<ParseError>() {
            return 4;
        }
        if cause.is::<RenderError>() {
            return 7;
        }
    }
    classify_by_message(err)
}

fn classify_by_message(err: &anyhow::Error) -> i32 {
    let lower = format!("{err:#}").to_lowercase();

    if lower.contains("config") {
        2
    } else if lower.contains("dataset") {
        3
    } else if lower.contains("snapshot") || lower.contains("parse error") {
        4
    } else if lower.contains("render") || lower.contains("cannot write") {
        7
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match commands::run(cli.command, cli.quiet) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn malformed(label: &str) -> DriftError {
        DriftError::Snapshot {
            label: label.into(),
            source: ParseError::MalformedLine {
                line: 2,
                content: "broken".into(),
            },
        }
    }

    #[test]
    fn exit_code_config() {
        let err = anyhow::Error::new(ConfigError::Invalid("fingerprint.bits must be greater than 0".into()))
            .context("Cannot load config: /data/dataset.toml");
        assert_eq!(classify_exit_code(&err), 2);
    }

    #[test]
    fn exit_code_dataset() {
        let err = anyhow::Error::new(DriftError::Dataset(DatasetError::NotFound(PathBuf::from("/nope"))))
            .context("Detection failed");
        assert_eq!(classify_exit_code(&err), 3);
    }

    #[test]
    fn exit_code_dataset_path_naming_config() {
        let err = anyhow::Error::new(DriftError::Dataset(DatasetError::NotFound(PathBuf::from(
            "/data/config_history",
        ))))
        .context("Detection failed");
        assert_eq!(classify_exit_code(&err), 3);
    }

    #[test]
    fn exit_code_snapshot() {
        let err = anyhow::Error::new(malformed("3_day.txt")).context("Detection failed");
        assert_eq!(classify_exit_code(&err), 4);
    }

    #[test]
    fn exit_code_snapshot_label_naming_dataset() {
        let err = anyhow::Error::new(malformed("3_dataset.txt")).context("Detection failed");
        assert_eq!(classify_exit_code(&err), 4);
    }

    #[test]
    fn exit_code_bare_parse_error() {
        let err = anyhow::Error::new(ParseError::MalformedLine {
            line: 1,
            content: "x".into(),
        })
        .context("Snapshot /data/config/1.txt: parse error");
        assert_eq!(classify_exit_code(&err), 4);
    }

    #[test]
    fn exit_code_render() {
        let err = anyhow::Error::new(RenderError::Io(std::io::Error::other("permission denied")))
            .context("Cannot write json report");
        assert_eq!(classify_exit_code(&err), 7);
    }

    #[test]
    fn exit_code_falls_back_to_message() {
        let err = anyhow::anyhow!("Cannot load config: /tmp/graphdrift.toml");
        assert_eq!(classify_exit_code(&err), 2);
    }

    #[test]
    fn exit_code_general() {
        let err = anyhow::anyhow!("Something unexpected happened");
        assert_eq!(classify_exit_code(&err), 1);
    }
}
