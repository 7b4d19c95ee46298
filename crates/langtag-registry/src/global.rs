//! Process-wide registry instance.
//!
//! Loaded on first use from [`RegistryConfig::from_env`] and shared for the
//! lifetime of the process. A failed load is remembered: later calls return
//! [`RegistryError::MissingData`] without retrying.

use std::sync::OnceLock;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::store::{Registry, Table, TableRef};

static GLOBAL: OnceLock<Result<Registry, String>> = OnceLock::new();

/// The shared registry, loading it on first call.
pub fn global() -> RegistryResult<&'static Registry> {
    let loaded = GLOBAL.get_or_init(|| {
        Registry::load(&RegistryConfig::from_env()).map_err(|e| {
            tracing::error!(error = %e, "failed to load language subtag registry");
            e.to_string()
        })
    });
    loaded.as_ref().map_err(|reason| RegistryError::MissingData {
        reason: reason.clone(),
    })
}

/// One table of the shared registry.
pub fn get(table: Table) -> RegistryResult<TableRef<'static>> {
    Ok(global()?.get(table))
}
