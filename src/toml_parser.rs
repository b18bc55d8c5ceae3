use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::de::DeserializeOwned;

use crate::error::{DepGraphError, TomlParseError};

/// Read and deserialize a TOML document
///
/// A missing file is not an error and yields `Ok(None)`. Syntax errors carry
/// the file contents and the offending span for diagnostics.
pub fn parse_optional_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DepGraphError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DepGraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    parse_str(path, content).map(Some)
}

pub fn parse_str<T: DeserializeOwned>(path: &Path, content: String) -> Result<T, DepGraphError> {
    toml::from_str(&content).map_err(|e| {
        // Try to extract span information from the error
        let span = e
            .span()
            .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

        DepGraphError::TomlParseError(Box::new(TomlParseError {
            file: path.display().to_string(),
            source_code: NamedSource::new(path.display().to_string(), content.clone()),
            span,
            source: e,
        }))
    })
}
