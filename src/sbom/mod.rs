//! # SBOM Acquisition Module
//!
//! Obtains CycloneDX Software Bills of Materials describing a project's
//! packages and their dependency edges.
//!
//! ## Components
//!
//! - **SbomExporter**: seam over whatever produces the raw JSON document
//! - **UvExporter**: runs `uv export --format cyclonedx1.5`
//! - **SbomCache**: bounded least-recently-used cache keyed by
//!   [`ExportRequest`]
//! - **SbomFetcher**: exporter plus cache, returning parsed documents
//!
//! ## Example
//!
//! ```
//! use uv_dep_graph::error::DepGraphError;
//! use uv_dep_graph::sbom::{ExportRequest, SbomExporter, SbomFetcher};
//!
//! struct Canned;
//!
//! impl SbomExporter for Canned {
//!     fn export(&self, _request: &ExportRequest) -> Result<String, DepGraphError> {
//!         Ok(r#"{"metadata": {"component": {"name": "app", "bom-ref": "app"}}}"#.to_string())
//!     }
//! }
//!
//! # fn main() -> Result<(), DepGraphError> {
//! let mut fetcher = SbomFetcher::new(Canned);
//! let bom = fetcher.fetch(&ExportRequest::default())?;
//! assert_eq!(bom.root_component().and_then(|c| c.name.as_deref()), Some("app"));
//! # Ok(())
//! # }
//! ```

mod cache;
mod cyclonedx;
mod exporter;

pub use cache::{SbomCache, SbomFetcher};
pub use cyclonedx::{Component, CycloneDxBom, DependencyRecord, Metadata};
pub use exporter::{ExportRequest, SbomExporter, UvExporter};
