use std::path::Path;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

pub struct ProgressReporter {
    term: Term,
    exports: usize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            exports: 0,
            current_bar: None,
        }
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            pb.set_style(spinner_style.tick_strings(SPINNER_FRAMES));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn start_render(&self, project: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Exporting dependency graph for {}...",
            style("📦").cyan(),
            style(project.display()).dim()
        );
    }

    /// Show a spinner while one SBOM export runs
    pub fn start_export(&mut self, label: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        self.current_bar = Some(self.create_spinner(&format!("uv export: {label}")));
    }

    pub fn finish_export(&mut self, ok: bool) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if ok {
            self.exports += 1;
        }
    }

    /// Exporter runs that completed successfully
    pub fn exports(&self) -> usize {
        self.exports
    }

    pub fn finish_render(&self, nodes: usize, output: Option<&Path>) {
        let exports = self.exports;
        eprintln!(
            "{} Rendered {} {} from {} {}",
            style("✓").green(),
            style(nodes).yellow().bold(),
            pluralize("package", nodes),
            exports,
            pluralize("export", exports)
        );
        if let Some(path) = output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(path.display()).bold()
            );
        }
    }
}
