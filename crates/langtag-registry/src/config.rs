//! Registry source configuration.
//!
//! By default the snapshot compiled into the crate is used. Set
//! `LANGTAG_REGISTRY_PATH` to load a newer registry from disk instead.
//! A path ending in `.json` is read as a JSON bundle; any other path is
//! read as IANA record-jar text.

use std::path::{Path, PathBuf};

/// Environment variable naming an external registry file.
pub const REGISTRY_PATH_ENV: &str = "LANGTAG_REGISTRY_PATH";

/// Where registry data comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegistrySource {
    /// The snapshot compiled into this crate.
    #[default]
    Embedded,
    /// A registry file on disk.
    File(PathBuf),
}

/// On-disk format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    RecordJar,
    JsonBundle,
}

impl SourceFormat {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::JsonBundle,
            _ => Self::RecordJar,
        }
    }
}

/// Configuration for loading the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub source: RegistrySource,
}

impl RegistryConfig {
    pub fn embedded() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: RegistrySource::File(path.into()),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Variables:
    /// - `LANGTAG_REGISTRY_PATH` (default: embedded snapshot). An empty
    ///   value counts as unset.
    pub fn from_env() -> Self {
        match std::env::var_os(REGISTRY_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(PathBuf::from(path)),
            _ => Self::embedded(),
        }
    }
}
