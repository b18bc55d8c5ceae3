//! Dependency groups and extras declared in `pyproject.toml`

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DepGraphError;
use crate::toml_parser;

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    project: Option<ProjectTable>,
    #[serde(default, rename = "dependency-groups")]
    dependency_groups: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "optional-dependencies")]
    optional_dependencies: BTreeMap<String, toml::Value>,
}

/// The bucket names a project makes available
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectManifest {
    pub name: Option<String>,
    pub groups: Vec<String>,
    pub extras: Vec<String>,
}

impl ProjectManifest {
    /// Load a manifest; a missing file gives an empty one
    pub fn from_path(path: &Path) -> Result<Self, DepGraphError> {
        let pyproject: Option<PyProject> = toml_parser::parse_optional_file(path)?;
        Ok(pyproject.map(Self::from_pyproject).unwrap_or_default())
    }

    pub fn parse(path: &Path, content: String) -> Result<Self, DepGraphError> {
        let pyproject: PyProject = toml_parser::parse_str(path, content)?;
        Ok(Self::from_pyproject(pyproject))
    }

    fn from_pyproject(pyproject: PyProject) -> Self {
        let project = pyproject.project.unwrap_or_default();
        Self {
            name: project.name,
            groups: pyproject.dependency_groups.into_keys().collect(),
            extras: project.optional_dependencies.into_keys().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.extras.is_empty()
    }
}
