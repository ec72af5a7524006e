//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `RIDEFORGE_{PROVIDER}_API_KEY`
//! 2. Project-local: `.rideforge/config.toml`
//! 3. Global: `~/.rideforge/config.toml`

use crate::provider::{ImageQuality, ImageSize};
use rideforge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration (generation and archive providers share
/// the same table)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Archive provider name; None means local-only storage
    #[serde(default)]
    pub archive: Option<String>,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub quality: ImageQuality,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_creator")]
    pub creator: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            archive: None,
            size: ImageSize::default(),
            quality: ImageQuality::default(),
            output_dir: default_output_dir(),
            db_path: default_db_path(),
            creator: default_creator(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_output_dir() -> String {
    ".rideforge/generated".to_string()
}
fn default_db_path() -> String {
    "rideforge_assets.db".to_string()
}
fn default_creator() -> String {
    "AI_Generator".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl ForgeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = ForgeConfigFile::default();

        // Layer 1: Global config (~/.rideforge/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.rideforge/config.toml)
        let local_path = PathBuf::from(".rideforge/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Config with no providers and default generation settings
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
            generation: GenerationConfig::default(),
        }
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL for a provider (or its default)
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".rideforge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ForgeConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: ForgeConfigFile = toml::from_str(&content).map_err(|e| {
            ForgeError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut ForgeConfigFile, overlay: ForgeConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            entry.enabled = provider.enabled;
        }

        let defaults = GenerationConfig::default();
        let overlay_gen = overlay.generation;
        if overlay_gen.provider != defaults.provider {
            base.generation.provider = overlay_gen.provider;
        }
        if overlay_gen.archive.is_some() {
            base.generation.archive = overlay_gen.archive;
        }
        if overlay_gen.size != defaults.size {
            base.generation.size = overlay_gen.size;
        }
        if overlay_gen.quality != defaults.quality {
            base.generation.quality = overlay_gen.quality;
        }
        if overlay_gen.output_dir != defaults.output_dir {
            base.generation.output_dir = overlay_gen.output_dir;
        }
        if overlay_gen.db_path != defaults.db_path {
            base.generation.db_path = overlay_gen.db_path;
        }
        if overlay_gen.creator != defaults.creator {
            base.generation.creator = overlay_gen.creator;
        }
    }

    fn apply_env_overrides(config: &mut ForgeConfigFile) {
        let provider_names = ["openai", "drive"];
        for name in &provider_names {
            let env_key = format!("RIDEFORGE_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}
