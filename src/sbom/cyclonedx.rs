//! CycloneDX document types
//!
//! Only the parts of the CycloneDX schema needed to rebuild the dependency
//! graph are modelled. Everything else in the document is ignored.

use serde::Deserialize;

use crate::error::DepGraphError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycloneDxBom {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub component: Option<Component>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "bom-ref")]
    pub bom_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyRecord {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

impl CycloneDxBom {
    pub fn from_json(raw: &str) -> Result<Self, DepGraphError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The root component described in the document metadata
    pub fn root_component(&self) -> Option<&Component> {
        self.metadata.as_ref().and_then(|m| m.component.as_ref())
    }
}

impl Component {
    /// Key the component is stored under: its BOM reference, or its name
    pub fn key(&self) -> Option<&str> {
        self.bom_ref.as_deref().or(self.name.as_deref())
    }

    /// Display name, falling back to the BOM reference
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.bom_ref.as_deref())
    }
}
