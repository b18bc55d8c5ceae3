//! Version specifiers declared in `uv.lock`
//!
//! Only packages built from local sources (the project and its workspace
//! members) carry a `[package.metadata]` table, so in practice this exposes
//! the constraints the project itself declares. They are used for labels and
//! play no structural role.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::DepGraphError;
use crate::graph::BucketKind;
use crate::toml_parser;

#[derive(Debug, Deserialize)]
struct UvLock {
    #[serde(default)]
    package: Vec<LockPackage>,
}

#[derive(Debug, Deserialize)]
struct LockPackage {
    name: String,
    #[serde(default)]
    metadata: Option<LockMetadata>,
}

#[derive(Debug, Deserialize)]
struct LockMetadata {
    #[serde(default, rename = "requires-dist")]
    requires_dist: Vec<Requirement>,
    #[serde(default, rename = "requires-dev")]
    requires_dev: BTreeMap<String, Vec<Requirement>>,
}

#[derive(Debug, Deserialize)]
struct Requirement {
    name: String,
    #[serde(default)]
    specifier: Option<String>,
    #[serde(default)]
    marker: Option<String>,
}

/// Dependency name → specifier
pub type SpecifierMap = BTreeMap<String, String>;

/// Specifiers one package declares, split by where they were declared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSpecifiers {
    pub requires: SpecifierMap,
    pub groups: BTreeMap<String, SpecifierMap>,
    pub extras: BTreeMap<String, SpecifierMap>,
}

/// Specifiers for every package in the lockfile that declares any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSpecifiers {
    packages: BTreeMap<String, PackageSpecifiers>,
}

impl LockSpecifiers {
    /// Load specifiers from a lockfile; a missing file gives an empty set
    pub fn from_path(path: &Path) -> Result<Self, DepGraphError> {
        let lock: Option<UvLock> = toml_parser::parse_optional_file(path)?;
        Ok(lock.map(Self::from_lock).unwrap_or_default())
    }

    pub fn parse(path: &Path, content: String) -> Result<Self, DepGraphError> {
        let lock: UvLock = toml_parser::parse_str(path, content)?;
        Ok(Self::from_lock(lock))
    }

    fn from_lock(lock: UvLock) -> Self {
        let mut packages = BTreeMap::new();

        for package in lock.package {
            let Some(metadata) = package.metadata else {
                continue;
            };
            let mut specs = PackageSpecifiers::default();

            for req in metadata.requires_dist {
                let Some(specifier) = req.specifier.filter(|s| !s.is_empty()) else {
                    continue;
                };
                let target = match req.marker.as_deref().and_then(marker_extra) {
                    Some(extra) => specs.extras.entry(canonicalize_name(&extra)).or_default(),
                    None => &mut specs.requires,
                };
                target.entry(canonicalize_name(&req.name)).or_insert(specifier);
            }

            for (group, reqs) in metadata.requires_dev {
                let target = specs.groups.entry(canonicalize_name(&group)).or_default();
                for req in reqs {
                    if let Some(specifier) = req.specifier.filter(|s| !s.is_empty()) {
                        target.entry(canonicalize_name(&req.name)).or_insert(specifier);
                    }
                }
            }

            packages.insert(canonicalize_name(&package.name), specs);
        }

        Self { packages }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn package(&self, name: &str) -> Option<&PackageSpecifiers> {
        self.packages.get(&canonicalize_name(name))
    }

    /// Specifier `from` declares for its unconditional dependency on `to`
    pub fn edge(&self, from: &str, to: &str) -> Option<&str> {
        self.package(from)?
            .requires
            .get(&canonicalize_name(to))
            .map(String::as_str)
    }

    /// Specifier `owner` declares for `package` inside a group or extra
    pub fn bucket(
        &self,
        owner: &str,
        kind: BucketKind,
        bucket: &str,
        package: &str,
    ) -> Option<&str> {
        let specs = self.package(owner)?;
        let table = match kind {
            BucketKind::Group => &specs.groups,
            BucketKind::Extra => &specs.extras,
        };
        table
            .get(&canonicalize_name(bucket))?
            .get(&canonicalize_name(package))
            .map(String::as_str)
    }
}

/// Runs of `-`, `_` and `.` in a package name
static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("static regex"));

/// `extra == '<name>'` clause of an environment marker
static EXTRA_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bextra\s*==\s*['"]([^'"]+)['"]"#).expect("static regex")
});

/// Normalize a Python package name: lower-case, with runs of `-`, `_` and
/// `.` collapsed to a single `-`
pub fn canonicalize_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Extract the extra name from a marker such as `extra == 'xlsx'`
fn marker_extra(marker: &str) -> Option<String> {
    EXTRA_MARKER
        .captures(marker)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
