//! # uv-dep-graph - Mermaid Dependency Graphs for uv Projects
//!
//! uv-dep-graph asks `uv export` for a CycloneDX SBOM, turns it into a
//! dependency graph and renders the graph as a Mermaid flowchart. Packages
//! that only a dependency group or an optional extra pulls in are
//! attributed to that bucket and drawn in a box of their own.
//!
//! ## Main Components
//!
//! - **Sbom**: exporter seam, CycloneDX document types and a small LRU cache
//!   of exporter output
//! - **Graph**: graph building, filters, bucket classification, layout
//!   metrics and the Mermaid renderer
//! - **Pipeline**: runs the exports a request needs and applies the filters
//!   in order
//! - **Lockfile / Manifest**: version specifiers from `uv.lock` and bucket
//!   names from `pyproject.toml`
//!
//! ## Usage
//!
//! Any [`sbom::SbomExporter`] can feed the pipeline; the CLI uses
//! [`sbom::UvExporter`], tests use canned documents.
//!
//! ```
//! use uv_dep_graph::error::DepGraphError;
//! use uv_dep_graph::pipeline::{GraphPipeline, GraphRequest};
//! use uv_dep_graph::sbom::{ExportRequest, SbomExporter};
//!
//! struct Canned;
//!
//! impl SbomExporter for Canned {
//!     fn export(&self, _request: &ExportRequest) -> Result<String, DepGraphError> {
//!         Ok(r#"{
//!             "metadata": {"component": {"name": "app", "version": "1.0.0", "bom-ref": "app"}},
//!             "components": [{"name": "click", "version": "8.1.7", "bom-ref": "click"}],
//!             "dependencies": [{"ref": "app", "dependsOn": ["click"]}]
//!         }"#
//!         .to_string())
//!     }
//! }
//!
//! # fn main() -> miette::Result<()> {
//! let mut pipeline = GraphPipeline::new(Canned);
//! let mermaid = pipeline.render(&GraphRequest::default(), None)?;
//!
//! assert!(mermaid.starts_with("flowchart LR"));
//! assert!(mermaid.contains("app ==> click"));
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod toml_parser;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod executors;
pub mod graph;
pub mod lockfile;
pub mod manifest;
pub mod pipeline;
pub mod progress;
pub mod sbom;

/// Install the stderr tracing subscriber used by the binary
///
/// The filter comes from `UV_DEP_GRAPH_LOG` and defaults to `warn`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(constants::output::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
