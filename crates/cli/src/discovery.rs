//! Plugin directory and registry discovery.

use std::path::{Path, PathBuf};

use miette::{Result, miette};
use plugfetch_core::PluginRegistry;

/// Returns the default plugin directory: `<data dir>/plugfetch/plugins`.
pub fn default_plugin_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("plugfetch").join("plugins"))
        .ok_or_else(|| miette!("Cannot determine data directory; pass --plugin-dir"))
}

/// Resolves the plugin directory from the command line or the default.
pub fn plugin_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => default_plugin_dir(),
    }
}

/// Loads the registry file if given, otherwise the built-in registry.
pub fn load_registry(path: Option<&Path>) -> Result<PluginRegistry> {
    match path {
        Some(path) => PluginRegistry::from_file(path).map_err(|e| miette!("{}", e)),
        None => Ok(PluginRegistry::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_plugin_dir() {
        let dir = plugin_dir(Some(PathBuf::from("/opt/plugins"))).unwrap();
        assert_eq!(dir, Path::new("/opt/plugins"));
    }

    #[test]
    fn test_default_plugin_dir_layout() {
        if let Ok(dir) = default_plugin_dir() {
            assert!(dir.ends_with("plugfetch/plugins"));
        }
    }

    #[test]
    fn test_builtin_registry() {
        let registry = load_registry(None).unwrap();
        assert!(registry.get("yaml.config.plugin").is_ok());
    }

    #[test]
    fn test_registry_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plugins.json");
        fs::write(
            &path,
            r#"{ "plugins": [ { "id": "my.plugin", "url": "https://example.com/releases" } ] }"#,
        )
        .unwrap();

        let registry = load_registry(Some(&path)).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("yaml.config.plugin").is_err());
    }

    #[test]
    fn test_missing_registry_file() {
        let dir = tempdir().unwrap();
        assert!(load_registry(Some(&dir.path().join("missing.json"))).is_err());
    }
}
