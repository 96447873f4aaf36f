use super::relate::SetPolicy;
use crate::stmt::CursorPolicy;

use indexmap::IndexMap;
use serde::Deserialize;

/// Schema-wide settings, usually deserialized from the application's
/// configuration file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub provider: DatabaseProvider,

    pub relation_set: SetPolicy,

    pub cursor: CursorPolicy,

    /// Named file and image storage backends
    pub storage: IndexMap<String, StorageConfig>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    #[default]
    Sqlite,
    Postgresql,
    Mysql,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    Local {
        path: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    S3 {
        bucket: String,
        region: String,
    },
}

/// How a list's `id` field gets its value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Autoincrement,
    Cuid,
    Uuid,
}

impl Config {
    pub fn from_json(src: &str) -> crate::Result<Config> {
        Ok(serde_json::from_str(src)?)
    }
}

impl DatabaseProvider {
    pub fn name(self) -> &'static str {
        match self {
            DatabaseProvider::Sqlite => "sqlite",
            DatabaseProvider::Postgresql => "postgresql",
            DatabaseProvider::Mysql => "mysql",
        }
    }

    pub fn supports_native_types(self) -> bool {
        !matches!(self, DatabaseProvider::Sqlite)
    }
}
