//! Progress reporting for batch runs.
//!
//! `BatchProgress` draws an indicatif bar on the terminal. In log-only mode
//! the bar stays hidden and every few percent a tracing line is emitted
//! instead, which reads better in redirected output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tracing::info;

const BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})";

/// Log lines per run in log-only mode.
const LOG_STEPS: u64 = 20;

/// Progress over a known number of releases. Shared by reference between
/// rayon workers.
pub struct BatchProgress {
    bar: ProgressBar,
    label: String,
    total: u64,
    log_only: bool,
    log_every: u64,
}

impl BatchProgress {
    pub fn new(total: u64, label: &str, log_only: bool) -> Self {
        let bar = ProgressBar::new(total);
        if log_only {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            let style = ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ");
            bar.set_style(style);
        }
        bar.set_message(label.to_string());

        Self {
            bar,
            label: label.to_string(),
            total,
            log_only,
            log_every: (total / LOG_STEPS).max(1),
        }
    }

    /// One release done.
    pub fn advance(&self) {
        self.bar.inc(1);
        if !self.log_only {
            return;
        }
        let done = self.bar.position();
        if done % self.log_every == 0 || done == self.total {
            let pct = 100.0 * done as f64 / self.total.max(1) as f64;
            info!("{}: {}/{} ({:.1}%)", self.label, done, self.total, pct);
        }
    }

    pub fn done(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Short elapsed-time label: seconds below a minute, minutes above.
pub fn elapsed_label(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}
