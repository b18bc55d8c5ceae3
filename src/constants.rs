//! Configuration constants for uv-dep-graph
//!
//! This module contains the fixed values used throughout the application.
//! Paths and the exporter program can be overridden from the command line or
//! through environment variables.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while the exporter runs
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒", "✓"];
}

/// SBOM export configuration
pub mod export {
    /// Program invoked to export the SBOM
    pub const DEFAULT_PROGRAM: &str = "uv";

    /// CycloneDX format flag value understood by `uv export`
    pub const CYCLONEDX_FORMAT: &str = "cyclonedx1.5";

    /// Number of raw exporter outputs kept in memory
    pub const CACHE_CAPACITY: usize = 16;
}

/// Project file names
pub mod files {
    pub const LOCKFILE: &str = "uv.lock";
    pub const MANIFEST: &str = "pyproject.toml";
}

/// Rendering configuration
pub mod render {
    /// Base URL for package links
    pub const PYPI_PROJECT_URL: &str = "https://pypi.org/project";
}

/// Output formatting configuration
pub mod output {
    /// Default output format for listings
    pub const DEFAULT_FORMAT: &str = "human";

    /// Environment variable holding the tracing filter
    pub const LOG_ENV: &str = "UV_DEP_GRAPH_LOG";
}
