use std::path::PathBuf;
use std::process::ExitStatus;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(uv_dep_graph::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DepGraphError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(uv_dep_graph::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error("SBOM exporter output is not valid CycloneDX JSON")]
    #[diagnostic(
        code(uv_dep_graph::sbom_parse_error),
        help("Make sure your uv version supports `uv export --format cyclonedx1.5`")
    )]
    SbomParse(#[from] serde_json::Error),

    #[error("Failed to launch SBOM exporter '{program}'")]
    #[diagnostic(
        code(uv_dep_graph::exporter_launch),
        help("Install uv or point --uv at the executable")
    )]
    ExporterLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SBOM exporter '{program}' failed ({status}): {stderr}")]
    #[diagnostic(
        code(uv_dep_graph::exporter_failed),
        help("Run the same `uv export` command by hand to see the full output")
    )]
    ExporterFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("String formatting error")]
    #[diagnostic(
        code(uv_dep_graph::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(uv_dep_graph::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(uv_dep_graph::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(uv_dep_graph::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

impl DepGraphError {
    /// Build an [`DepGraphError::ExporterFailed`] from a finished process
    pub fn exporter_failed(program: &str, status: ExitStatus, stderr: &[u8]) -> Self {
        DepGraphError::ExporterFailed {
            program: program.to_string(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_toml_parse_error_display() {
        let source_code = "invalid = toml content";
        let toml_err = toml::from_str::<toml::Value>(source_code).unwrap_err();

        let error = TomlParseError {
            file: "uv.lock".to_string(),
            source_code: NamedSource::new("uv.lock", source_code.to_string()),
            span: Some((10, 4).into()),
            source: toml_err,
        };

        assert_eq!(error.to_string(), "Invalid TOML syntax in 'uv.lock'");
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = DepGraphError::FileReadError {
            path: PathBuf::from("/tmp/missing.lock"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.lock'");
    }

    #[test]
    fn test_exporter_failed_display() {
        let error = DepGraphError::ExporterFailed {
            program: "uv".to_string(),
            status: "exit status: 2".to_string(),
            stderr: "error: No `pyproject.toml` found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "SBOM exporter 'uv' failed (exit status: 2): error: No `pyproject.toml` found"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = DepGraphError::ConfigurationError {
            message: "--only-unique needs at least one group or extra".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: --only-unique needs at least one group or extra"
        );
    }

    #[test]
    fn test_error_codes() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let launch_err = DepGraphError::ExporterLaunch {
            program: "uv".to_string(),
            source: io_err,
        };

        use miette::Diagnostic;
        assert!(launch_err.code().is_some());
        assert!(launch_err.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json}").unwrap_err();
        let err: DepGraphError = json_err.into();

        match err {
            DepGraphError::SbomParse(_) => {}
            _ => panic!("Expected SbomParse variant"),
        }
    }

    #[test]
    fn test_error_conversion_from_fmt() {
        let err: DepGraphError = std::fmt::Error.into();
        assert!(matches!(err, DepGraphError::Fmt(_)));
        assert_eq!(err.to_string(), "String formatting error");
    }
}
