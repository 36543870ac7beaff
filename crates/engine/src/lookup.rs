//! Finding an installed copy of a plugin in the plugin directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plugfetch_core::{FetchError, PluginRegistryEntry, Result};

/// Suffix of in-flight downloads; never treated as an installed plugin.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Outcome of looking for an installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledPlugin {
    /// A regular file; safe to replace.
    File(PathBuf),

    /// A directory; never removed automatically.
    Directory(PathBuf),

    /// Nothing installed for this plugin.
    NotFound,
}

/// Installed copies of a plugin found in the plugin directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// The copy an install acts on: the first regular file in name order,
    /// else the first directory.
    pub installed: InstalledPlugin,

    /// Every matching directory, including one reported in `installed`.
    pub directories: Vec<PathBuf>,
}

impl Lookup {
    fn not_found() -> Self {
        Self {
            installed: InstalledPlugin::NotFound,
            directories: Vec::new(),
        }
    }
}

/// Looks up the installed copy of `entry` in `plugin_dir`.
///
/// A missing plugin directory counts as not found. Regular files win over
/// directories, so a directory never hides a jar that is due for
/// replacement.
pub fn find_installed(plugin_dir: &Path, entry: &PluginRegistryEntry) -> Result<Lookup> {
    let lookup_err = |source: io::Error| FetchError::PluginLookup {
        dir: plugin_dir.to_path_buf(),
        source,
    };

    let read_dir = match fs::read_dir(plugin_dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Lookup::not_found()),
        Err(e) => return Err(lookup_err(e)),
    };

    let mut files = Vec::new();
    let mut directories = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(lookup_err)?;
        let name = dir_entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if !belongs_to(name, entry) {
            continue;
        }

        let path = dir_entry.path();
        if fs::metadata(&path).map_err(lookup_err)?.is_dir() {
            directories.push(path);
        } else {
            files.push(path);
        }
    }

    files.sort();
    directories.sort();

    let installed = match (files.first(), directories.first()) {
        (Some(file), _) => InstalledPlugin::File(file.clone()),
        (None, Some(dir)) => InstalledPlugin::Directory(dir.clone()),
        (None, None) => InstalledPlugin::NotFound,
    };

    if let Some((first, others)) = files.split_first() {
        for other in others {
            tracing::warn!(
                plugin = %entry.id,
                path = %other.display(),
                "additional installed copy found; only {} will be replaced",
                first.display()
            );
        }
    }

    Ok(Lookup {
        installed,
        directories,
    })
}

/// Whether a directory entry name belongs to the plugin.
fn belongs_to(name: &str, entry: &PluginRegistryEntry) -> bool {
    if name.ends_with(PARTIAL_SUFFIX) || name.starts_with('.') {
        return false;
    }

    if name == entry.id {
        return true;
    }

    match name.strip_prefix(entry.artifact_prefix()) {
        Some(rest) => rest.is_empty() || rest.starts_with(['-', '_', '.']),
        None => false,
    }
}
