//! Model catalog used by the default-model picker
//!
//! The catalog is compiled into the binary from `resources/models.yaml`.
//! Models are identified as `provider/model`.

use crate::error::{Error, Result};
use serde::Deserialize;

const EMBEDDED_CATALOG: &str = include_str!("../resources/models.yaml");

/// Parsed model catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ModelCatalog {
    pub providers: Vec<Provider>,
}

/// A model provider and the models it serves
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub preferred: bool,
}

impl ModelCatalog {
    /// Load the catalog compiled into the binary
    pub fn from_embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: ModelCatalog = serde_yaml_ng::from_str(yaml)?;
        if catalog.providers.iter().all(|p| p.models.is_empty()) {
            return Err(Error::catalog("catalog does not list any models"));
        }
        Ok(catalog)
    }

    /// Preferred models, in catalog order
    pub fn preferred(&self) -> Vec<String> {
        self.qualified(|m| m.preferred)
    }

    /// Every model, in catalog order
    pub fn all(&self) -> Vec<String> {
        self.qualified(|_| true)
    }

    fn qualified(&self, keep: impl Fn(&Model) -> bool) -> Vec<String> {
        self.providers
            .iter()
            .flat_map(|p| {
                p.models
                    .iter()
                    .filter(|m| keep(m))
                    .map(move |m| format!("{}/{}", p.name, m.name))
            })
            .collect()
    }
}

/// Preferred models from the embedded catalog
pub fn get_available_models() -> Result<Vec<String>> {
    Ok(ModelCatalog::from_embedded()?.preferred())
}

/// All models from the embedded catalog
pub fn get_all_available_models() -> Result<Vec<String>> {
    Ok(ModelCatalog::from_embedded()?.all())
}
