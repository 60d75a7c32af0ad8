//! Benchmark dataset registry
//!
//! Maps each dataset name to the language code and pretrained vectors it is
//! trained with. The built-in table covers the five benchmark corpora; a
//! registry loaded from configuration can replace it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanbenchError};

/// Per-dataset training parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetSpec {
    /// Dataset name, matching its directory under the metrics root
    pub name: String,

    /// Two-letter language code
    pub lang: String,

    /// Pretrained vectors package for the language
    pub vectors: String,
}

impl DatasetSpec {
    pub fn new(name: &str, lang: &str, vectors: &str) -> Self {
        Self {
            name: name.to_string(),
            lang: lang.to_string(),
            vectors: vectors.to_string(),
        }
    }
}

/// Ordered collection of benchmark datasets
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetRegistry {
    #[serde(rename = "dataset")]
    datasets: Vec<DatasetSpec>,
}

impl DatasetRegistry {
    pub fn new(datasets: Vec<DatasetSpec>) -> Result<Self> {
        if datasets.is_empty() {
            return Err(SpanbenchError::Configuration(
                "dataset registry must contain at least one dataset".to_string(),
            ));
        }
        for spec in &datasets {
            if spec.name.is_empty() {
                return Err(SpanbenchError::Configuration(
                    "dataset name must not be empty".to_string(),
                ));
            }
        }
        Ok(Self { datasets })
    }

    /// Load a registry from a TOML file of `[[dataset]]` tables.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpanbenchError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let registry: Self = toml::from_str(&content).map_err(|e| {
            SpanbenchError::Configuration(format!(
                "failed to parse dataset registry '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::new(registry.datasets)
    }

    /// All registered datasets, in registration order
    pub fn datasets(&self) -> &[DatasetSpec] {
        &self.datasets
    }

    /// Look up a dataset by name
    pub fn get(&self, name: &str) -> Option<&DatasetSpec> {
        self.datasets.iter().find(|d| d.name == name)
    }

    /// Restrict the registry to the named datasets, preserving request order.
    ///
    /// Unknown names are a configuration error listing what is available.
    pub fn select(&self, names: &[String]) -> Result<Self> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            match self.get(name) {
                Some(spec) => selected.push(spec.clone()),
                None => {
                    return Err(SpanbenchError::Configuration(format!(
                        "unknown dataset '{}' (available: {})",
                        name,
                        self.names().join(", ")
                    )))
                }
            }
        }
        Self::new(selected)
    }

    pub fn names(&self) -> Vec<String> {
        self.datasets.iter().map(|d| d.name.clone()).collect()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self {
            datasets: vec![
                DatasetSpec::new("anem", "en", "en_core_web_lg"),
                DatasetSpec::new("nl-conll", "nl", "nl_core_news_lg"),
                DatasetSpec::new("es-conll", "es", "es_core_news_lg"),
                DatasetSpec::new("wnut17", "en", "en_core_web_lg"),
                DatasetSpec::new("archaeo", "nl", "nl_core_news_lg"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_five_datasets() {
        let registry = DatasetRegistry::default();
        assert_eq!(registry.datasets().len(), 5);
        assert!(registry.get("wnut17").is_some());
        assert!(registry.get("archaeo").is_some());
    }

    #[test]
    fn test_language_and_vectors_lookup() {
        let registry = DatasetRegistry::default();
        let spec = registry.get("nl-conll").unwrap();
        assert_eq!(spec.lang, "nl");
        assert_eq!(spec.vectors, "nl_core_news_lg");
    }

    #[test]
    fn test_select_preserves_request_order() {
        let registry = DatasetRegistry::default();
        let selected = registry
            .select(&["wnut17".to_string(), "anem".to_string()])
            .unwrap();
        assert_eq!(selected.names(), vec!["wnut17", "anem"]);
    }

    #[test]
    fn test_select_unknown_dataset_fails() {
        let registry = DatasetRegistry::default();
        let err = registry.select(&["nonesuch".to_string()]).unwrap_err();
        assert!(err.to_string().contains("nonesuch"));
        assert!(err.to_string().contains("available"));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(DatasetRegistry::new(vec![]).is_err());
    }

    #[test]
    fn test_load_registry_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datasets.toml");
        fs::write(
            &path,
            r#"
[[dataset]]
name = "toy"
lang = "en"
vectors = "en_core_web_sm"

[[dataset]]
name = "toy-nl"
lang = "nl"
vectors = "nl_core_news_sm"
"#,
        )
        .unwrap();

        let registry = DatasetRegistry::from_file(&path).unwrap();
        assert_eq!(registry.names(), vec!["toy", "toy-nl"]);
        assert_eq!(registry.get("toy").unwrap().vectors, "en_core_web_sm");
    }

    #[test]
    fn test_load_registry_bad_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datasets.toml");
        fs::write(&path, "[[dataset]]\nname = 42\n").unwrap();

        let err = DatasetRegistry::from_file(&path).unwrap_err();
        assert!(matches!(err, SpanbenchError::Configuration(_)));
    }
}
