//! # Graph Construction and Rendering Module
//!
//! This module turns a CycloneDX SBOM into a dependency graph, reshapes it,
//! and renders it as a Mermaid flowchart.
//!
//! ## Components
//!
//! ### Graph Building
//! - **build_dependency_graph**: node map (BOM ref → package) and name edges
//! - **classify_buckets**: attributes packages to dependency groups and extras
//! - **DependencyGraph::filter_to_package / trim_to_depth / retain_names**:
//!   pure filters returning new graphs
//!
//! ### Graph Rendering
//! - **LayoutMetrics**: degree, subtree size and depth used to order output
//! - **MermaidRenderer**: deterministic Mermaid flowchart output
//!
//! ## Example
//!
//! ```
//! use uv_dep_graph::graph::{DependencyGraph, Edge, MermaidRenderer, NodeMap, Package};
//!
//! # fn main() -> miette::Result<()> {
//! let mut nodes = NodeMap::new();
//! nodes.insert("app".to_string(), Package::new("app", "1.0.0"));
//! nodes.insert("httpx".to_string(), Package::new("httpx", "0.27.0"));
//! nodes.insert("idna".to_string(), Package::new("idna", "3.7"));
//!
//! let graph = DependencyGraph::new(
//!     "app",
//!     nodes,
//!     vec![Edge::new("app", "httpx"), Edge::new("httpx", "idna")],
//! );
//!
//! let mermaid = MermaidRenderer::new().render_to_string(&graph.trim_to_depth(1))?;
//! assert!(mermaid.starts_with("flowchart LR"));
//! assert!(mermaid.contains("app ==> httpx"));
//! assert!(!mermaid.contains("idna"));
//! # Ok(())
//! # }
//! ```

mod buckets;
mod builder;
mod filter;
mod metrics;
mod renderer;
mod types;

pub use buckets::{BucketCandidate, Classification, add_extra_edges, classify_buckets};
pub use builder::{build_dependency_graph, package_names};
pub use metrics::{LayoutMetrics, degrees, depths_from, subtree_sizes};
pub use renderer::{MermaidRenderer, normalize_package_name};
pub use types::{Bucket, BucketKind, DependencyGraph, Edge, NodeMap, Package};
