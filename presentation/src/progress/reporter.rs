//! Progress reporting for the provider cascade

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use studybuddy_application::{GenerationProgress, ProviderError};

const TICK: Duration = Duration::from_millis(100);

/// Reports cascade progress with a spinner on stderr
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.enable_steady_tick(TICK);
        spinner.set_message("Starting...");
        Self { spinner }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner line if it is still running
    pub fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_tier_start(&self, provider: &str) {
        self.spinner.set_prefix(provider.to_string());
        self.spinner.set_message("Generating...");
    }

    fn on_model_attempt(&self, model: &str, attempt: u32) {
        if attempt > 1 {
            self.spinner
                .set_message(format!("{} (attempt {})", model, attempt));
        } else {
            self.spinner.set_message(model.to_string());
        }
    }

    fn on_rate_limited(&self, model: &str, delay: Duration) {
        self.spinner.set_message(format!(
            "{} {} - retrying in {}ms",
            model,
            "rate limited".yellow(),
            delay.as_millis()
        ));
    }

    fn on_tier_failed(&self, provider: &str, error: &ProviderError) {
        self.spinner
            .println(format!("{} {}: {}", "x".red(), provider, error.message()));
    }

    fn on_complete(&self, provider: &str) {
        self.spinner
            .finish_with_message(format!("{} answered by {}", "v".green(), provider));
    }

    fn on_exhausted(&self) {
        self.spinner.finish_with_message(format!(
            "{} all providers failed, using fallback content",
            "x".red()
        ));
    }
}

/// Simple line-based progress for non-interactive stderr
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_tier_start(&self, provider: &str) {
        eprintln!("{} {}", "->".cyan(), provider.bold());
    }

    fn on_model_attempt(&self, model: &str, attempt: u32) {
        eprintln!("   {} (attempt {})", model, attempt);
    }

    fn on_rate_limited(&self, model: &str, delay: Duration) {
        eprintln!(
            "   {} {} rate limited, waiting {}ms",
            "!".yellow(),
            model,
            delay.as_millis()
        );
    }

    fn on_tier_failed(&self, provider: &str, error: &ProviderError) {
        eprintln!("  {} {} ({})", "x".red(), provider, error.message());
    }

    fn on_complete(&self, provider: &str) {
        eprintln!("  {} {}", "v".green(), provider);
    }

    fn on_exhausted(&self) {
        eprintln!("  {} all providers failed", "x".red());
    }
}
