//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A named, versioned package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Mapping from BOM reference to package
pub type NodeMap = BTreeMap<String, Package>;

/// "`from` depends on `to`", by package name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A dependency graph rooted at one package
///
/// `edges` is a multiset: several BOM references may collapse onto the same
/// pair of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub root: String,
    pub nodes: NodeMap,
    pub edges: Vec<Edge>,
}

impl DependencyGraph {
    pub fn new(root: impl Into<String>, nodes: NodeMap, edges: Vec<Edge>) -> Self {
        Self {
            root: root.into(),
            nodes,
            edges,
        }
    }

    /// Distinct package names present in the node map
    pub fn names(&self) -> BTreeSet<&str> {
        self.nodes.values().map(|p| p.name.as_str()).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.nodes.values().any(|p| p.name == name)
    }

    /// Edges with duplicates removed, as ordered `(from, to)` pairs
    pub fn unique_edges(&self) -> BTreeSet<(String, String)> {
        self.edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone()))
            .collect()
    }
}

/// Kind of named partition a package can be attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKind {
    Group,
    Extra,
}

impl BucketKind {
    /// Command-line flag that activates a bucket of this kind
    pub fn flag(&self) -> &'static str {
        match self {
            BucketKind::Group => "--group",
            BucketKind::Extra => "--extra",
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKind::Group => write!(f, "group"),
            BucketKind::Extra => write!(f, "extra"),
        }
    }
}

/// Packages uniquely pulled in by one dependency group or extra
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub kind: BucketKind,
    pub name: String,
    pub packages: BTreeSet<String>,
}

impl Bucket {
    pub fn new(kind: BucketKind, name: impl Into<String>, packages: BTreeSet<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            packages,
        }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }
}
