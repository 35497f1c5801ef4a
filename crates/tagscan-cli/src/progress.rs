use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tagscan_pipeline::DocumentOutcome;

use crate::ui;

/// Document counter drawn on stderr; a no-op when progress is disabled.
#[derive(Clone)]
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
}

fn bar_template() -> &'static str {
    match terminal_columns() {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {pos}/{len} documents {msg}",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {pos}/{len} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    /// A bar when the corpus size is known, a spinner otherwise.
    #[must_use]
    pub fn for_corpus(len: Option<usize>) -> Self {
        match len {
            Some(total) => Self::bar(u64::try_from(total).unwrap_or(u64::MAX)),
            None => Self::spinner("scanning streamed paths"),
        }
    }

    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {pos} documents {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    #[must_use]
    pub fn bar(total: u64) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar: Some(bar) }
    }

    /// Advance by one finished document, naming the latest failure.
    pub fn observe(&self, outcome: &DocumentOutcome) {
        let Some(bar) = &self.bar else {
            return;
        };
        bar.inc(1);
        if let DocumentOutcome::Failed { .. } = outcome
            && let Some(name) = outcome.path().and_then(|path| path.file_name())
        {
            bar.set_message(format!("skipped {}", name.to_string_lossy()));
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
