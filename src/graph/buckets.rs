//! Attribution of packages to dependency groups and extras

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use super::types::{Bucket, BucketKind, DependencyGraph, Edge};

/// A bucket candidate before classification: everything its activation pulls in
#[derive(Debug, Clone)]
pub struct BucketCandidate {
    pub kind: BucketKind,
    pub name: String,
    pub packages: BTreeSet<String>,
}

impl BucketCandidate {
    pub fn new(kind: BucketKind, name: impl Into<String>, packages: BTreeSet<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            packages,
        }
    }
}

/// Result of [`classify_buckets`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub buckets: Vec<Bucket>,
    /// Packages that more than one bucket could have claimed, with every
    /// eligible bucket in processing order (the first one won)
    pub contested: BTreeMap<String, Vec<String>>,
}

impl Classification {
    pub fn groups(&self) -> Vec<Bucket> {
        self.of_kind(BucketKind::Group)
    }

    pub fn extras(&self) -> Vec<Bucket> {
        self.of_kind(BucketKind::Extra)
    }

    fn of_kind(&self, kind: BucketKind) -> Vec<Bucket> {
        self.buckets
            .iter()
            .filter(|b| b.kind == kind)
            .cloned()
            .collect()
    }

    /// The bucket that claimed `package`, if any
    pub fn owner(&self, package: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.contains(package))
    }

    /// Every claimed package plus the root: the allow-set used to hide base
    /// dependencies
    pub fn allowed_names(&self, root: &str) -> BTreeSet<String> {
        self.buckets
            .iter()
            .flat_map(|b| b.packages.iter().cloned())
            .chain(std::iter::once(root.to_string()))
            .collect()
    }
}

/// Attribute each package to at most one bucket
///
/// A package belongs to a bucket when activating that bucket pulls it in but
/// the base install does not. Candidates are processed in order and the
/// first bucket to claim a package keeps it. The root is never claimed.
pub fn classify_buckets(
    root: &str,
    base: &BTreeSet<String>,
    candidates: &[BucketCandidate],
) -> Classification {
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    let mut contested: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut buckets = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let label = format!("{} {}", candidate.kind, candidate.name);
        let mut unique = BTreeSet::new();

        for package in &candidate.packages {
            if package == root || base.contains(package) {
                continue;
            }
            match claimed.get(package) {
                Some(owner) => {
                    warn!(
                        package = %package,
                        kept_in = %owner,
                        also_in = %label,
                        "package is unique to several buckets; keeping the first"
                    );
                    contested
                        .entry(package.clone())
                        .or_insert_with(|| vec![owner.clone()])
                        .push(label.clone());
                }
                None => {
                    claimed.insert(package.clone(), label.clone());
                    unique.insert(package.clone());
                }
            }
        }

        buckets.push(Bucket::new(candidate.kind, candidate.name.clone(), unique));
    }

    Classification { buckets, contested }
}

/// Connect the root to every extra-only package present in the graph
///
/// Extras are activated from the root but the SBOM does not always record
/// those edges; without them extra packages would float unattached.
pub fn add_extra_edges(graph: &DependencyGraph, classification: &Classification) -> DependencyGraph {
    let names = graph.names();
    let mut edges = graph.edges.clone();
    for bucket in classification
        .buckets
        .iter()
        .filter(|b| b.kind == BucketKind::Extra)
    {
        for package in &bucket.packages {
            if names.contains(package.as_str()) {
                edges.push(Edge::new(graph.root.clone(), package.clone()));
            }
        }
    }

    DependencyGraph::new(graph.root.clone(), graph.nodes.clone(), edges)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::{NodeMap, Package};

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_first_bucket_claims_shared_package() {
        let candidates = vec![
            BucketCandidate::new(BucketKind::Group, "test", set(&["pytest", "coverage"])),
            BucketCandidate::new(BucketKind::Group, "typing", set(&["mypy", "coverage"])),
        ];

        let result = classify_buckets("app", &BTreeSet::new(), &candidates);

        assert_eq!(result.buckets[0].packages, set(&["coverage", "pytest"]));
        assert_eq!(result.buckets[1].packages, set(&["mypy"]));
        assert_eq!(
            result.contested.get("coverage"),
            Some(&vec!["group test".to_string(), "group typing".to_string()])
        );
    }

    #[test]
    fn test_base_packages_and_root_are_never_claimed() {
        let candidates = vec![BucketCandidate::new(
            BucketKind::Extra,
            "xlsx",
            set(&["app", "openpyxl", "et-xmlfile", "click"]),
        )];

        let result = classify_buckets("app", &set(&["click"]), &candidates);

        assert_eq!(result.buckets[0].packages, set(&["et-xmlfile", "openpyxl"]));
        assert!(result.contested.is_empty());
        assert!(result.owner("app").is_none());
        assert_eq!(result.owner("openpyxl").map(|b| b.name.as_str()), Some("xlsx"));
    }

    #[test]
    fn test_classification_is_a_partition() {
        let candidates = vec![
            BucketCandidate::new(BucketKind::Group, "test", set(&["a", "b", "c"])),
            BucketCandidate::new(BucketKind::Group, "docs", set(&["b", "c", "d"])),
            BucketCandidate::new(BucketKind::Extra, "cli", set(&["c", "d", "e"])),
        ];

        let result = classify_buckets("root", &set(&["a"]), &candidates);

        let mut seen = BTreeSet::new();
        for bucket in &result.buckets {
            for package in &bucket.packages {
                assert!(seen.insert(package.clone()), "{package} claimed twice");
            }
        }
        assert_eq!(seen, set(&["b", "c", "d", "e"]));
        assert_eq!(result.groups().len(), 2);
        assert_eq!(result.extras().len(), 1);
    }

    #[test]
    fn test_empty_buckets_are_kept() {
        let candidates = vec![BucketCandidate::new(
            BucketKind::Group,
            "dev",
            set(&["click"]),
        )];
        let result = classify_buckets("app", &set(&["click"]), &candidates);
        assert_eq!(result.buckets.len(), 1);
        assert!(result.buckets[0].packages.is_empty());
    }

    #[test]
    fn test_allowed_names_include_root() {
        let candidates = vec![BucketCandidate::new(
            BucketKind::Group,
            "test",
            set(&["pytest"]),
        )];
        let result = classify_buckets("app", &BTreeSet::new(), &candidates);
        assert_eq!(result.allowed_names("app"), set(&["app", "pytest"]));
    }

    #[test]
    fn test_add_extra_edges_links_root_to_extra_packages() {
        let mut nodes = NodeMap::new();
        nodes.insert("app".to_string(), Package::new("app", "1.0"));
        nodes.insert("openpyxl".to_string(), Package::new("openpyxl", "3.1.5"));
        let graph = DependencyGraph::new("app", nodes, Vec::new());

        let candidates = vec![
            BucketCandidate::new(BucketKind::Group, "test", set(&["pytest"])),
            BucketCandidate::new(BucketKind::Extra, "xlsx", set(&["openpyxl", "absent"])),
        ];
        let classification = classify_buckets("app", &BTreeSet::new(), &candidates);

        let linked = add_extra_edges(&graph, &classification);
        assert_eq!(linked.edges, vec![Edge::new("app", "openpyxl")]);
    }
}
