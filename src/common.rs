//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::files::{LOCKFILE, MANIFEST};

/// Project location shared by every command
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Directory holding pyproject.toml and uv.lock (defaults to current
    /// directory)
    #[arg(long, value_name = "DIR", env = "UV_DEP_GRAPH_PROJECT")]
    pub project: Option<PathBuf>,
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "UV_DEP_GRAPH_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

impl ProjectArgs {
    /// Get the project directory, using the current directory if none was
    /// provided
    pub fn get_project_dir(&self) -> PathBuf {
        match &self.project {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Paths of the project files next to a project directory
pub fn manifest_path(project_dir: &std::path::Path) -> PathBuf {
    project_dir.join(MANIFEST)
}

pub fn lockfile_path(project_dir: &std::path::Path) -> PathBuf {
    project_dir.join(LOCKFILE)
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DepGraphError>;
}

/// Trait for configurations that can be created from CLI commands
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::DepGraphError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::DepGraphError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
