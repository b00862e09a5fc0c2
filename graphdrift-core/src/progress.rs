//! Progress reporting for the per-snapshot fingerprinting stage.
//!
//! The CLI uses [`IndicatifReporter`] for a progress bar on stderr.
//! Library callers can use [`NoopReporter`] or provide their own
//! implementation; reporters are called from rayon worker threads.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives progress events from a pipeline run.
pub trait ProgressReporter: Send + Sync {
    /// A stage begins with `total` units of work, if known.
    fn start(&self, stage: &str, total: Option<u64>);

    /// `amount` more units finished.
    fn advance(&self, amount: u64);

    /// The current stage is done.
    fn finish(&self);

    /// A note for the user, printed without disturbing the bar.
    fn message(&self, msg: &str);
}

/// Reporter that drops every event.
#[derive(Debug, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn start(&self, _stage: &str, _total: Option<u64>) {}
    fn advance(&self, _amount: u64) {}
    fn finish(&self) {}
    fn message(&self, _msg: &str) {}
}

/// Reporter backed by an `indicatif` bar.
#[derive(Debug)]
pub struct IndicatifReporter {
    bar: ProgressBar,
}

impl Default for IndicatifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatifReporter {
    /// Bar drawn on stderr.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Bar that never draws.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_draw_target(target);
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for IndicatifReporter {
    fn start(&self, stage: &str, total: Option<u64>) {
        let style = match total {
            Some(total) => {
                self.bar.set_length(total);
                ProgressStyle::with_template(
                    "{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len} snapshots ({eta})",
                )
                .map(|s| s.progress_chars("=> "))
            }
            None => {
                self.bar.set_length(0);
                ProgressStyle::with_template("{spinner:.green} {msg} {pos} snapshots")
            }
        };
        self.bar
            .set_style(style.unwrap_or_else(|_| ProgressStyle::default_bar()));
        self.bar.set_message(stage.to_string());
        self.bar.reset();
    }

    fn advance(&self, amount: u64) {
        self.bar.inc(amount);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn message(&self, msg: &str) {
        self.bar.println(msg);
    }
}
