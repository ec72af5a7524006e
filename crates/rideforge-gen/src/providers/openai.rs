//! OpenAI image generation provider
//!
//! Submits the composed prompt to the Images API and downloads the
//! returned asset. Calls are single attempt: a failed call or download
//! aborts the current generation attempt and the caller moves on.

use crate::config::ForgeConfig;
use crate::provider::*;
use rideforge_core::{ForgeError, Result};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/images/generations";
const DEFAULT_MODEL: &str = "dall-e-3";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// OpenAI provider for vehicle concept image generation
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    api_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider from config
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let api_key = config
            .api_key("openai")
            .ok_or_else(|| {
                ForgeError::GenerationFailed(
                    "OpenAI API key not configured. Set RIDEFORGE_OPENAI_API_KEY or add to .rideforge/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("openai")
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        Ok(Self { api_key, api_url })
    }

    fn submit(
        &self,
        prompt: &str,
        size: ImageSize,
        quality: ImageQuality,
    ) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "model": DEFAULT_MODEL,
            "prompt": prompt,
            "size": size.api_value(),
            "quality": quality.api_value(),
            "n": 1
        });

        let agent = build_agent();
        let mut response = agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                ForgeError::GenerationFailed(format!("image API request failed: {}", e))
            })?;

        response.body_mut().read_json().map_err(|e| {
            ForgeError::GenerationFailed(format!("failed to parse image API response: {}", e))
        })
    }
}

pub(crate) fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

/// Download raw bytes from a URL
pub(crate) fn download_bytes(url: &str) -> Result<Vec<u8>> {
    let agent = build_agent();
    let response = agent
        .get(url)
        .call()
        .map_err(|e| ForgeError::DownloadFailed(format!("{}: {}", url, e)))?;

    let mut reader = response.into_body().into_reader();
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut bytes)
        .map_err(|e| ForgeError::DownloadFailed(format!("failed to read image data: {}", e)))?;
    Ok(bytes)
}

/// Extract the generated image URL from an Images API response
pub fn parse_image_url(response: &serde_json::Value) -> Result<String> {
    response
        .get("data")
        .and_then(|data| data.as_array())
        .and_then(|arr| arr.first())
        .and_then(|item| item.get("url"))
        .and_then(|url| url.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ForgeError::GenerationFailed(format!(
                "Unexpected image API response format: {}",
                serde_json::to_string_pretty(response).unwrap_or_default()
            ))
        })
}

impl ImageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, prompt: &str, size: ImageSize, quality: ImageQuality) -> Result<ImageRef> {
        let response = self.submit(prompt, size, quality)?;
        let url = parse_image_url(&response)?;
        Ok(ImageRef::Url(url))
    }

    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>> {
        match image {
            ImageRef::Url(url) => download_bytes(url),
            ImageRef::Inline(bytes) => Ok(bytes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_url() {
        let response: serde_json::Value = serde_json::from_str(
            r#"{
                "created": 1722945600,
                "data": [
                    {
                        "url": "https://example.com/generated.png",
                        "revised_prompt": "a vehicle"
                    }
                ]
            }"#,
        )
        .unwrap();

        let url = parse_image_url(&response).unwrap();
        assert_eq!(url, "https://example.com/generated.png");
    }

    #[test]
    fn test_parse_image_url_error_payload() {
        let response: serde_json::Value =
            serde_json::from_str(r#"{"error": {"message": "rate limited"}}"#).unwrap();
        let err = parse_image_url(&response).unwrap_err();
        assert!(matches!(err, ForgeError::GenerationFailed(_)));
    }

    #[test]
    fn test_missing_api_key_is_generation_failed() {
        let config = ForgeConfig::empty();
        let err = OpenAiProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, ForgeError::GenerationFailed(_)));
    }
}
