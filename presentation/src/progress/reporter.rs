//! Progress reporting while a message is relayed

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use relay_application::ports::progress::ProgressNotifier;
use relay_domain::QueryMode;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress with indicatif bars on stderr
pub struct ProgressReporter {
    multi: MultiProgress,
    dispatch_bar: Mutex<Option<ProgressBar>>,
    synthesis_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            dispatch_bar: Mutex::new(None),
            synthesis_spinner: Mutex::new(None),
        }
    }

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:20.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn mode_label(mode: QueryMode) -> &'static str {
        if mode.is_dual() { "Asking both" } else { "Asking" }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_dispatch_start(&self, mode: QueryMode, providers: &[&str]) {
        let pb = self.multi.add(ProgressBar::new(providers.len() as u64));
        pb.set_style(Self::dispatch_style());
        pb.set_prefix(Self::mode_label(mode));
        pb.set_message(providers.join(", "));
        pb.enable_steady_tick(Duration::from_millis(120));

        *self
            .dispatch_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_provider_complete(&self, provider: &str, success: bool) {
        let mut slot = self
            .dispatch_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(pb) = slot.as_ref() else {
            return;
        };

        let status = if success {
            format!("{} {}", "v".green(), provider)
        } else {
            format!("{} {}", "x".red(), provider)
        };
        pb.inc(1);

        if pb.length().is_some_and(|len| pb.position() >= len) {
            pb.finish_with_message(status);
            *slot = None;
        } else {
            pb.set_message(status);
        }
    }

    fn on_synthesis_start(&self, provider: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Synthesizing");
        spinner.set_message(format!("with {}", provider));
        spinner.enable_steady_tick(Duration::from_millis(120));

        *self
            .synthesis_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(spinner);
    }

    fn on_synthesis_complete(&self, fallback: bool) {
        if let Some(spinner) = self
            .synthesis_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            if fallback {
                spinner.finish_with_message(format!("{}", "failed, combining answers".yellow()));
            } else {
                spinner.finish_with_message(format!("{}", "done".green()));
            }
        }
    }
}

/// Simple text-based progress for non-terminal stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, mode: QueryMode, providers: &[&str]) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::mode_label(mode).bold(),
            providers.join(", ")
        );
    }

    fn on_provider_complete(&self, provider: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }

    fn on_synthesis_start(&self, provider: &str) {
        eprintln!("{} {} with {}", "->".cyan(), "Synthesizing".bold(), provider);
    }

    fn on_synthesis_complete(&self, fallback: bool) {
        if fallback {
            eprintln!("  {} synthesis failed, combining answers", "!".yellow());
        }
    }
}
