use std::collections::BTreeSet;

use tracing::debug;

use super::types::{DependencyGraph, Edge, NodeMap, Package};
use crate::sbom::CycloneDxBom;

/// Build a dependency graph from a CycloneDX document
///
/// Nodes are keyed by BOM reference. Edges are recorded by package name and
/// only between known nodes; references that do not resolve are dropped.
///
/// `root_package` only replaces the reported root name. Nodes and edges are
/// the same with or without it.
pub fn build_dependency_graph(sbom: &CycloneDxBom, root_package: Option<&str>) -> DependencyGraph {
    let mut nodes = NodeMap::new();

    let root = sbom.root_component();
    let mut root_name = root
        .and_then(|c| c.display_name())
        .unwrap_or_default()
        .to_string();

    for component in root.into_iter().chain(sbom.components.iter()) {
        let (Some(key), Some(name)) = (component.key(), component.display_name()) else {
            continue;
        };
        nodes.insert(
            key.to_string(),
            Package::new(name, component.version.clone().unwrap_or_default()),
        );
    }

    let mut edges = Vec::new();
    let mut dropped = 0usize;
    for record in &sbom.dependencies {
        let Some(from) = nodes.get(&record.reference) else {
            dropped += record.depends_on.len();
            continue;
        };
        for target in &record.depends_on {
            match nodes.get(target) {
                Some(to) => edges.push(Edge::new(from.name.clone(), to.name.clone())),
                None => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, "ignored dependency references to unknown components");
    }

    if let Some(name) = root_package {
        root_name = name.to_string();
    }

    DependencyGraph::new(root_name, nodes, edges)
}

/// Names of every component in the document, excluding the root
pub fn package_names(sbom: &CycloneDxBom) -> BTreeSet<String> {
    let root_name = sbom.root_component().and_then(|c| c.display_name());
    sbom.components
        .iter()
        .filter_map(|c| c.display_name())
        .filter(|name| Some(*name) != root_name)
        .map(str::to_string)
        .collect()
}
