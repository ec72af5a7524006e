//! Error types for Rideforge

use thiserror::Error;

/// The main error type for Rideforge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Unknown {category} key: {key}")]
    UnknownCategoryKey { category: String, key: String },

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Duplicate image id: {0}")]
    DuplicateKey(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for Rideforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Construct an `UnknownCategoryKey` without the call-site `to_string` noise
    pub fn unknown_key(category: &str, key: &str) -> Self {
        ForgeError::UnknownCategoryKey {
            category: category.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        ForgeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ForgeError {
    fn from(err: toml::ser::Error) -> Self {
        ForgeError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_message_names_category() {
        let err = ForgeError::unknown_key("biome", "lava_lake");
        assert_eq!(err.to_string(), "Unknown biome key: lava_lake");
    }

    #[test]
    fn test_duplicate_key_message() {
        let err = ForgeError::DuplicateKey("amalfi_noble_speedster_v01".to_string());
        assert!(err.to_string().contains("amalfi_noble_speedster_v01"));
    }
}
