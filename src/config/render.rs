//! Render command configuration

use std::path::PathBuf;

use crate::error::DepGraphError;
use crate::pipeline::GraphRequest;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub project_dir: PathBuf,
    pub program: String,
    pub output: Option<PathBuf>,
    pub request: GraphRequest,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct RenderConfigBuilder {
    project_dir: Option<PathBuf>,
    program: Option<String>,
    output: Option<Option<PathBuf>>,
    package: Option<String>,
    groups: Vec<String>,
    extras: Vec<String>,
    all_groups: bool,
    all_extras: bool,
    only_unique: bool,
    depth: Option<usize>,
    frozen: bool,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_dir(mut self, project_dir: PathBuf) -> Self {
        self.project_dir = Some(project_dir);
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_all_groups(mut self, all_groups: bool) -> Self {
        self.all_groups = all_groups;
        self
    }

    pub fn with_all_extras(mut self, all_extras: bool) -> Self {
        self.all_extras = all_extras;
        self
    }

    pub fn with_only_unique(mut self, only_unique: bool) -> Self {
        self.only_unique = only_unique;
        self
    }

    pub fn with_depth(mut self, depth: Option<usize>) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }
}

impl crate::common::ConfigBuilder for RenderConfigBuilder {
    type Config = RenderConfig;

    fn build(self) -> Result<Self::Config, DepGraphError> {
        let program = self
            .program
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| DepGraphError::ConfigurationError {
                message: "Missing required field: program".to_string(),
            })?;
        let package = self.package.filter(|p| !p.trim().is_empty());

        Ok(RenderConfig {
            project_dir: self.project_dir.ok_or_else(|| {
                DepGraphError::ConfigurationError {
                    message: "Missing required field: project_dir".to_string(),
                }
            })?,
            program,
            output: self
                .output
                .ok_or_else(|| DepGraphError::ConfigurationError {
                    message: "Missing required field: output".to_string(),
                })?,
            request: GraphRequest {
                package,
                groups: self.groups,
                extras: self.extras,
                all_groups: self.all_groups,
                all_extras: self.all_extras,
                only_unique: self.only_unique,
                depth: self.depth,
                frozen: self.frozen,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    #[test]
    fn test_build_render_config() {
        let config = RenderConfig::builder()
            .with_project_dir(PathBuf::from("app"))
            .with_program("uv")
            .with_output(None)
            .with_groups(vec!["test".to_string()])
            .with_depth(Some(2))
            .build()
            .unwrap();

        assert_eq!(config.program, "uv");
        assert_eq!(config.request.groups, vec!["test".to_string()]);
        assert_eq!(config.request.depth, Some(2));
        assert!(!config.request.only_unique);
    }

    #[test]
    fn test_missing_project_dir_is_an_error() {
        let err = RenderConfig::builder()
            .with_program("uv")
            .with_output(None)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("project_dir"));
    }

    #[test]
    fn test_blank_package_is_ignored() {
        let config = RenderConfig::builder()
            .with_project_dir(PathBuf::from("."))
            .with_program("uv")
            .with_output(None)
            .with_package(Some("  ".to_string()))
            .build()
            .unwrap();
        assert_eq!(config.request.package, None);
    }
}
