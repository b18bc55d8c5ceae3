//! # Configuration Module
//!
//! Configuration structures for the uv-dep-graph commands. Each command has
//! its own config module with a builder for construction.
//!
//! - **RenderConfig**: configuration for the `render` command
//! - **BucketsConfig**: configuration for the `buckets` command
//!
//! ## Example
//!
//! ```
//! use uv_dep_graph::cli::OutputFormat;
//! use uv_dep_graph::common::ConfigBuilder;
//! use uv_dep_graph::config::{BucketsConfig, RenderConfig};
//!
//! # fn main() -> Result<(), uv_dep_graph::error::DepGraphError> {
//! let render = RenderConfig::builder()
//!     .with_project_dir(".".into())
//!     .with_program("uv")
//!     .with_output(None)
//!     .with_extras(vec!["xlsx".to_string()])
//!     .build()?;
//! assert_eq!(render.request.extras, vec!["xlsx".to_string()]);
//!
//! let buckets = BucketsConfig::builder()
//!     .with_project_dir(".".into())
//!     .with_format(OutputFormat::Json)
//!     .build()?;
//! assert_eq!(buckets.format, OutputFormat::Json);
//! # Ok(())
//! # }
//! ```

pub mod buckets;
pub mod render;

pub use buckets::BucketsConfig;
pub use render::RenderConfig;
