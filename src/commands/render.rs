//! Render command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::RenderConfig;
use crate::error::DepGraphError;

impl FromCommand for RenderConfig {
    fn from_command(command: Commands) -> Result<Self, DepGraphError> {
        match command {
            Commands::Render {
                project,
                package,
                groups,
                extras,
                all_groups,
                all_extras,
                only_unique,
                depth,
                frozen,
                uv,
                output,
            } => RenderConfig::builder()
                .with_project_dir(project.get_project_dir())
                .with_program(uv)
                .with_output(output)
                .with_package(package)
                .with_groups(groups)
                .with_extras(extras)
                .with_all_groups(all_groups)
                .with_all_extras(all_extras)
                .with_only_unique(only_unique)
                .with_depth(depth)
                .with_frozen(frozen)
                .build(),
            _ => Err(DepGraphError::ConfigurationError {
                message: "Invalid command type for RenderConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(RenderConfig);

/// Execute the render command
pub fn execute_render_command(command: Commands) -> Result<()> {
    let config = RenderConfig::from_command(command)
        .wrap_err("Failed to parse render command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::render::RenderExecutor;
    RenderExecutor::execute(config)
}
