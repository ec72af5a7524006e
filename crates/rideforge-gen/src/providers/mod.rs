//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod mock;
pub mod openai;

use crate::config::ForgeConfig;
use crate::provider::ImageProvider;
use rideforge_core::{ForgeError, Result};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &ForgeConfig) -> Result<Box<dyn ImageProvider>> {
    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new())),
        "openai" => Ok(Box::new(openai::OpenAiProvider::from_config(config)?)),
        _ => Err(ForgeError::GenerationFailed(format!(
            "Unknown provider '{}'. Available: mock, openai",
            name
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "openai"]
}
