//! Known plugins and where their releases are published.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Asset suffix used when a registry entry does not name one.
pub const DEFAULT_ASSET_SUFFIX: &str = ".jar";

/// A known plugin and its release feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRegistryEntry {
    /// Plugin id.
    pub id: String,

    /// Release feed URL (GitHub releases API).
    pub url: String,

    /// File name prefix of installed artifacts; defaults to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_prefix: Option<String>,

    /// Suffix of the downloadable asset; defaults to `.jar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_suffix: Option<String>,
}

impl PluginRegistryEntry {
    /// Creates an entry with default prefix and suffix.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            artifact_prefix: None,
            asset_suffix: None,
        }
    }

    /// Sets the artifact file name prefix.
    pub fn with_artifact_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.artifact_prefix = Some(prefix.into());
        self
    }

    /// Sets the asset suffix.
    pub fn with_asset_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.asset_suffix = Some(suffix.into());
        self
    }

    pub fn artifact_prefix(&self) -> &str {
        self.artifact_prefix.as_deref().unwrap_or(&self.id)
    }

    pub fn asset_suffix(&self) -> &str {
        self.asset_suffix.as_deref().unwrap_or(DEFAULT_ASSET_SUFFIX)
    }
}

/// On-disk registry layout.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    plugins: Vec<PluginRegistryEntry>,
}

/// The set of plugins that can be fetched, keyed by id.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    entries: BTreeMap<String, PluginRegistryEntry>,
}

impl PluginRegistry {
    /// Builds a registry, rejecting duplicate ids.
    pub fn new(entries: impl IntoIterator<Item = PluginRegistryEntry>) -> Result<Self> {
        let mut map = BTreeMap::new();

        for entry in entries {
            if entry.id.trim().is_empty() {
                return Err(FetchError::Registry {
                    path: "<registry>".into(),
                    reason: "plugin id must not be empty".to_string(),
                });
            }
            if map.contains_key(&entry.id) {
                return Err(FetchError::Registry {
                    path: "<registry>".into(),
                    reason: format!("duplicate plugin id `{}`", entry.id),
                });
            }
            map.insert(entry.id.clone(), entry);
        }

        Ok(Self { entries: map })
    }

    /// The config-repo plugins published on GitHub.
    pub fn builtin() -> Self {
        let entries = [
            PluginRegistryEntry::new(
                "yaml.config.plugin",
                "https://api.github.com/repos/tomzo/gocd-yaml-config-plugin/releases",
            )
            .with_artifact_prefix("yaml-config-plugin"),
            PluginRegistryEntry::new(
                "json.config.plugin",
                "https://api.github.com/repos/tomzo/gocd-json-config-plugin/releases",
            )
            .with_artifact_prefix("json-config-plugin"),
            PluginRegistryEntry::new(
                "cd.go.contrib.plugins.configrepo.groovy",
                "https://api.github.com/repos/gocd/gocd-groovy-dsl-config-plugin/releases",
            )
            .with_artifact_prefix("gocd-groovy-dsl-config-plugin"),
        ];

        Self {
            entries: entries.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Loads a registry from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FetchError::Registry {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|e| match e {
            FetchError::Registry { reason, .. } => FetchError::Registry {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parses a registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(json).map_err(|e| FetchError::Registry {
            path: "<registry>".into(),
            reason: e.to_string(),
        })?;

        let registry = Self::new(file.plugins)?;
        if registry.is_empty() {
            return Err(FetchError::Registry {
                path: "<registry>".into(),
                reason: "no plugins listed".to_string(),
            });
        }

        Ok(registry)
    }

    /// Looks up the entry for a plugin id.
    pub fn get(&self, id: &str) -> Result<&PluginRegistryEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| FetchError::UnknownPluginId {
                id: id.to_string(),
                known: self.short_list(),
            })
    }

    /// Returns all entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &PluginRegistryEntry> {
        self.entries.values()
    }

    /// Returns the known ids joined by `, `.
    pub fn short_list(&self) -> String {
        self.entries.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
