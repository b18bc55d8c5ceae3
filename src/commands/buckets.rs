//! Buckets command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::BucketsConfig;
use crate::error::DepGraphError;

impl FromCommand for BucketsConfig {
    fn from_command(command: Commands) -> Result<Self, DepGraphError> {
        match command {
            Commands::Buckets { project, format } => BucketsConfig::builder()
                .with_project_dir(project.get_project_dir())
                .with_format(format.format)
                .build(),
            _ => Err(DepGraphError::ConfigurationError {
                message: "Invalid command type for BucketsConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(BucketsConfig);

/// Execute the buckets command
pub fn execute_buckets_command(command: Commands) -> Result<()> {
    let config = BucketsConfig::from_command(command)
        .wrap_err("Failed to parse buckets command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::buckets::BucketsExecutor;
    BucketsExecutor::execute(config)
}
