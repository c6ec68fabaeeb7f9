use std::path::Path;

use config as cfg;
use serde::{Deserialize, Serialize};

use crate::error::{HostelError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file. `:memory:` is accepted for throwaway runs.
    pub path: String,
    /// Insert the sample fixture data when the database is empty.
    #[serde(default = "DatabaseConfig::default_seed")]
    pub seed: bool,
}

impl DatabaseConfig {
    fn default_seed() -> bool {
        true
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/hostel.db".into(),
            seed: Self::default_seed(),
        }
    }
}

/// Layered configuration: compiled defaults, then an optional `hostel.toml`
/// next to the working directory, then `HOSTEL__*` environment variables
/// (e.g. `HOSTEL__SERVER__PORT=8080`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HostelConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl HostelConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("hostel.toml"))
    }

    pub fn load_from(file: &Path) -> Result<Self> {
        let defaults = cfg::Config::try_from(&HostelConfig::default())
            .map_err(|e| HostelError::Config(e.to_string()))?;

        let settings = cfg::Config::builder()
            .add_source(defaults)
            .add_source(cfg::File::from(file.to_path_buf()).required(false))
            .add_source(
                cfg::Environment::with_prefix("HOSTEL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| HostelError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| HostelError::Config(e.to_string()))
    }
}
