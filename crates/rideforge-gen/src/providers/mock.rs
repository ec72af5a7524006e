//! Mock provider for tests and offline runs
//!
//! Produces a deterministic solid-color PNG derived from the prompt, so the
//! whole pipeline can run without network access or an API key.

use crate::provider::*;
use rideforge_core::{ForgeError, Result};
use std::io::Cursor;

/// A mock provider that renders placeholder images locally
#[derive(Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, prompt: &str, size: ImageSize, _quality: ImageQuality) -> Result<ImageRef> {
        let (width, height) = size.dimensions();
        let bytes = solid_png(prompt, width, height)?;
        Ok(ImageRef::Inline(bytes))
    }

    fn fetch(&self, image: &ImageRef) -> Result<Vec<u8>> {
        match image {
            ImageRef::Inline(bytes) => Ok(bytes.clone()),
            ImageRef::Url(url) => Err(ForgeError::DownloadFailed(format!(
                "mock provider cannot fetch URL: {}",
                url
            ))),
        }
    }
}

/// Encode a solid-color PNG with the color derived from the prompt text
fn solid_png(prompt: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    let hash_val = prompt
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let r = ((hash_val >> 16) & 0xFF) as u8;
    let g = ((hash_val >> 8) & 0xFF) as u8;
    let b = (hash_val & 0xFF) as u8;

    let mut img_data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..(width * height) {
        img_data.extend_from_slice(&[r, g, b, 255]);
    }

    let img = image::RgbaImage::from_raw(width, height, img_data)
        .ok_or_else(|| ForgeError::GenerationFailed("failed to create image buffer".to_string()))?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ForgeError::GenerationFailed(format!("failed to encode PNG: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_returns_inline_png() {
        let provider = MockProvider::new();
        let image = provider
            .generate("a vehicle", ImageSize::Square, ImageQuality::Hd)
            .unwrap();

        let bytes = provider.fetch(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_same_prompt_same_bytes() {
        let provider = MockProvider::new();
        let a = provider
            .generate("red speedster", ImageSize::Square, ImageQuality::Hd)
            .unwrap();
        let b = provider
            .generate("red speedster", ImageSize::Square, ImageQuality::Hd)
            .unwrap();

        assert_eq!(provider.fetch(&a).unwrap(), provider.fetch(&b).unwrap());
    }

    #[test]
    fn test_url_refs_are_rejected() {
        let provider = MockProvider::new();
        let err = provider
            .fetch(&ImageRef::Url("https://example.com/x.png".to_string()))
            .unwrap_err();
        assert!(matches!(err, ForgeError::DownloadFailed(_)));
    }

    #[test]
    fn test_health_check_always_available() {
        let provider = MockProvider::new();
        assert_eq!(provider.health_check().unwrap(), ProviderStatus::Available);
    }
}
