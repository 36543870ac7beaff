//! Plugfetch Core - Core types for resolving and installing plugin releases.

mod error;
mod registry;
mod release;
mod version_match;

pub use error::{FetchError, Result};
pub use registry::{DEFAULT_ASSET_SUFFIX, PluginRegistry, PluginRegistryEntry};
pub use release::{Asset, Release, ResolvedAsset, parse_tag};
pub use version_match::{Comparator, Op, PartialVersion, VersionMatch};
