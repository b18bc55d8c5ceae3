//! Buckets command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::error::DepGraphError;

#[derive(Debug, Clone)]
pub struct BucketsConfig {
    pub project_dir: PathBuf,
    pub format: OutputFormat,
}

impl BucketsConfig {
    pub fn builder() -> BucketsConfigBuilder {
        BucketsConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct BucketsConfigBuilder {
    project_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
}

impl BucketsConfigBuilder {
    pub fn new() -> Self {
        Self {
            project_dir: None,
            format: None,
        }
    }

    pub fn with_project_dir(mut self, project_dir: PathBuf) -> Self {
        self.project_dir = Some(project_dir);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl crate::common::ConfigBuilder for BucketsConfigBuilder {
    type Config = BucketsConfig;

    fn build(self) -> Result<Self::Config, DepGraphError> {
        Ok(BucketsConfig {
            project_dir: self.project_dir.ok_or_else(|| {
                DepGraphError::ConfigurationError {
                    message: "Missing required field: project_dir".to_string(),
                }
            })?,
            format: self
                .format
                .ok_or_else(|| DepGraphError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
        })
    }
}
