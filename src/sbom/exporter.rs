//! SBOM exporters
//!
//! An exporter turns an [`ExportRequest`] into the raw CycloneDX JSON text.
//! [`UvExporter`] shells out to `uv export`; tests plug in their own
//! implementations.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::constants::export::{CYCLONEDX_FORMAT, DEFAULT_PROGRAM};
use crate::error::DepGraphError;

/// Parameters of a single export, also used as the cache key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExportRequest {
    pub package: Option<String>,
    pub groups: Vec<String>,
    pub extras: Vec<String>,
    pub frozen: bool,
}

impl ExportRequest {
    pub fn new(package: Option<String>, frozen: bool) -> Self {
        Self {
            package,
            groups: Vec::new(),
            extras: Vec::new(),
            frozen,
        }
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_extras(mut self, extras: Vec<String>) -> Self {
        self.extras = extras;
        self
    }

    /// Arguments passed to `uv` for this request
    pub fn uv_args(&self) -> Vec<String> {
        let mut args = vec![
            "export".to_string(),
            "--format".to_string(),
            CYCLONEDX_FORMAT.to_string(),
            "--no-default-groups".to_string(),
        ];
        if self.frozen {
            args.push("--frozen".to_string());
        }
        if let Some(package) = &self.package {
            args.push("--package".to_string());
            args.push(package.clone());
        }
        for group in &self.groups {
            args.push("--group".to_string());
            args.push(group.clone());
        }
        for extra in &self.extras {
            args.push("--extra".to_string());
            args.push(extra.clone());
        }
        args
    }
}

/// Source of raw CycloneDX documents
pub trait SbomExporter {
    fn export(&self, request: &ExportRequest) -> Result<String, DepGraphError>;
}

/// Runs `uv export` and captures its standard output
#[derive(Debug, Clone)]
pub struct UvExporter {
    program: String,
    project_dir: Option<PathBuf>,
}

impl Default for UvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl UvExporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            project_dir: None,
        }
    }

    pub fn with_project_dir(mut self, project_dir: Option<PathBuf>) -> Self {
        self.project_dir = project_dir;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SbomExporter for UvExporter {
    fn export(&self, request: &ExportRequest) -> Result<String, DepGraphError> {
        let args = request.uv_args();
        debug!(program = %self.program, args = ?args, "running SBOM exporter");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.project_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .map_err(|source| DepGraphError::ExporterLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DepGraphError::exporter_failed(
                &self.program,
                output.status,
                &output.stderr,
            ));
        }

        String::from_utf8(output.stdout).map_err(|_| DepGraphError::ExporterFailed {
            program: self.program.clone(),
            status: output.status.to_string(),
            stderr: "standard output is not valid UTF-8".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_minimal_request_args() {
        let request = ExportRequest::default();
        assert_eq!(
            request.uv_args(),
            vec!["export", "--format", "cyclonedx1.5", "--no-default-groups"]
        );
    }

    #[test]
    fn test_scoped_request_args() {
        let request = ExportRequest::new(Some("api".to_string()), true)
            .with_groups(vec!["test".to_string(), "typing".to_string()])
            .with_extras(vec!["xlsx".to_string()]);

        assert_eq!(
            request.uv_args(),
            vec![
                "export",
                "--format",
                "cyclonedx1.5",
                "--no-default-groups",
                "--frozen",
                "--package",
                "api",
                "--group",
                "test",
                "--group",
                "typing",
                "--extra",
                "xlsx",
            ]
        );
    }

    #[test]
    fn test_requests_compare_by_value() {
        let a = ExportRequest::new(None, false).with_groups(vec!["test".to_string()]);
        let b = ExportRequest::new(None, false).with_groups(vec!["test".to_string()]);
        let c = ExportRequest::new(None, true).with_groups(vec!["test".to_string()]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_program_is_uv() {
        assert_eq!(UvExporter::default().program(), "uv");
        assert_eq!(UvExporter::new("/opt/uv/bin/uv").program(), "/opt/uv/bin/uv");
    }

    #[test]
    fn test_missing_program_is_a_launch_error() {
        let exporter = UvExporter::new("uv-dep-graph-definitely-not-installed");
        let err = exporter.export(&ExportRequest::default()).unwrap_err();
        assert!(matches!(err, DepGraphError::ExporterLaunch { .. }));
    }
}
