//! Import configuration from environment variables.

use std::env;
use std::path::Path;

/// Default import size limit (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Extension accepted when none are configured.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Limits applied to text file imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Largest file, in bytes, that will be imported.
    pub max_file_bytes: u64,
    /// Accepted file extensions, lowercase and without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            allowed_extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }
}

impl ImportConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PAGEDOC_IMPORT_MAX_BYTES`: import size limit (default: 10 MiB)
    /// - `PAGEDOC_IMPORT_EXTENSIONS`: comma-separated extensions (default: "txt")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_file_bytes = match lookup("PAGEDOC_IMPORT_MAX_BYTES") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                name: "PAGEDOC_IMPORT_MAX_BYTES".to_string(),
                reason: format!("{}", e),
            })?,
            None => DEFAULT_MAX_FILE_BYTES,
        };

        let allowed_extensions: Vec<String> = lookup("PAGEDOC_IMPORT_EXTENSIONS")
            .map(|raw| {
                raw.split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if allowed_extensions.is_empty() {
            return Ok(Self {
                max_file_bytes,
                ..Self::default()
            });
        }

        Ok(Self {
            max_file_bytes,
            allowed_extensions,
        })
    }

    /// Returns true if `path` carries one of the allowed extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
