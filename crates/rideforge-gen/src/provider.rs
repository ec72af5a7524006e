//! Image generation provider trait and request/result types

use rideforge_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output dimensions supported by the generation services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Square,
    Wide,
    Tall,
}

impl ImageSize {
    /// Wire value expected by the image API
    pub fn api_value(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Wide => "1792x1024",
            ImageSize::Tall => "1024x1792",
        }
    }

    /// Pixel dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ImageSize::Square => (1024, 1024),
            ImageSize::Wide => (1792, 1024),
            ImageSize::Tall => (1024, 1792),
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Square
    }
}

/// Rendering quality requested from the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn api_value(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

impl Default for ImageQuality {
    fn default() -> Self {
        ImageQuality::Hd
    }
}

impl fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_value())
    }
}

/// Reference to a generated image: a fetchable URL or inline bytes
#[derive(Debug, Clone)]
pub enum ImageRef {
    Url(String),
    Inline(Vec<u8>),
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Trait implemented by each image generation provider (OpenAI, Mock)
pub trait ImageProvider: Send {
    /// Provider name (e.g. "openai", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Submit a prompt and return a reference to the generated image.
    ///
    /// Single attempt: any call failure surfaces as `GenerationFailed` and
    /// aborts the current generation attempt.
    fn generate(&self, prompt: &str, size: ImageSize, quality: ImageQuality) -> Result<ImageRef>;

    /// Retrieve the image bytes behind a reference.
    ///
    /// Failure surfaces as `DownloadFailed` and aborts the attempt.
    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>>;
}
