//! Engine configuration, read once at startup.

use std::path::{Path, PathBuf};

use menagerie_domain::{AbilityCatalog, AbilityEntry, CatalogError};

/// Settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SQLite database file (`MENAGERIE_DB`)
    pub db_path: String,
    pub server_host: String,
    pub server_port: u16,
    /// JSON ability list replacing the built-in one (`ABILITY_CATALOG_PATH`)
    pub ability_catalog_path: Option<PathBuf>,
    /// Comma-separated origins, or `*` (`CORS_ALLOWED_ORIGINS`)
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            db_path: get("MENAGERIE_DB").unwrap_or_else(|| "menagerie.db".into()),
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: get("SERVER_PORT")
                .or_else(|| get("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            ability_catalog_path: get("ABILITY_CATALOG_PATH").map(PathBuf::from),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }

    /// The configured ability catalog, or the built-in one.
    pub fn ability_catalog(&self) -> Result<AbilityCatalog, ConfigError> {
        match &self.ability_catalog_path {
            Some(path) => load_ability_catalog(path),
            None => Ok(AbilityCatalog::builtin()?),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read a `[{"name": "...", "effect": "..."}]` file into a catalog.
pub fn load_ability_catalog(path: &Path) -> Result<AbilityCatalog, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<AbilityEntry> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(AbilityCatalog::from_entries(entries)?)
}
