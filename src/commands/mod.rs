//! Command implementations for the uv-dep-graph CLI
//!
//! - render: draw the dependency graph as Mermaid
//! - buckets: list the groups and extras a project declares

pub mod buckets;
pub mod render;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Render { .. } => render::execute_render_command(command),
        Commands::Buckets { .. } => buckets::execute_buckets_command(command),
    }
}
