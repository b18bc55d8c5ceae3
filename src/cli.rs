use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{FormatArgs, ProjectArgs};

#[derive(Parser)]
#[command(
    name = "uv-dep-graph",
    about = "📦 Draw the dependency graph of a uv project as a Mermaid flowchart",
    long_about = "uv-dep-graph asks uv for a CycloneDX SBOM of your project, turns it into a \
                  dependency graph and renders it as a Mermaid flowchart. Packages that only \
                  arrive through a dependency group or an optional extra are drawn in their own \
                  boxes.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dependency graph as Mermaid
    ///
    /// Runs `uv export` once for the full selection, and once more per
    /// requested group or extra to work out which packages each of them
    /// adds on top of the base install.
    #[command(
        long_about = "Render the dependency graph of a uv project as a Mermaid flowchart. \
                      Direct dependencies are collected in a primary box; packages that only a \
                      dependency group or extra pulls in are drawn in a box of their own and \
                      linked to the project with a dashed edge. Version specifiers from uv.lock \
                      label the edges they constrain."
    )]
    Render {
        #[command(flatten)]
        project: ProjectArgs,

        /// Workspace package to root the graph at
        #[arg(long, env = "UV_DEP_GRAPH_PACKAGE")]
        package: Option<String>,

        /// Dependency group to include (repeatable)
        #[arg(long = "group", value_name = "GROUP", env = "UV_DEP_GRAPH_GROUPS", value_delimiter = ',')]
        groups: Vec<String>,

        /// Optional extra to include (repeatable)
        #[arg(long = "extra", value_name = "EXTRA", env = "UV_DEP_GRAPH_EXTRAS", value_delimiter = ',')]
        extras: Vec<String>,

        /// Include every dependency group declared in pyproject.toml
        #[arg(long, env = "UV_DEP_GRAPH_ALL_GROUPS")]
        all_groups: bool,

        /// Include every extra declared in pyproject.toml
        #[arg(long, env = "UV_DEP_GRAPH_ALL_EXTRAS")]
        all_extras: bool,

        /// Only show packages that the requested groups and extras add
        #[arg(long, env = "UV_DEP_GRAPH_ONLY_UNIQUE")]
        only_unique: bool,

        /// Maximum distance from the root to draw
        #[arg(long, env = "UV_DEP_GRAPH_DEPTH")]
        depth: Option<usize>,

        /// Pass --frozen to uv so the lockfile is never updated
        #[arg(long, env = "UV_DEP_GRAPH_FROZEN")]
        frozen: bool,

        /// Program to run instead of `uv`
        #[arg(
            long = "uv",
            value_name = "PROGRAM",
            default_value = crate::constants::export::DEFAULT_PROGRAM,
            env = "UV_DEP_GRAPH_UV"
        )]
        uv: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "UV_DEP_GRAPH_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// List the dependency groups and extras a project declares
    Buckets {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
