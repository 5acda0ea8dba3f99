use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::ImageSynthesis;

/// FAL client for Flux image generation
#[derive(Debug)]
pub struct Fal {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model route (e.g. "fal-ai/flux/schnell")
    model: String,
    /// Requested image size preset
    image_size: String,
}

/// FAL image generation request
#[derive(Debug, Serialize)]
struct FluxRequest<'a> {
    /// Image prompt
    prompt: &'a str,

    /// Size preset (vertical video wants "portrait_16_9")
    image_size: &'a str,

    /// Number of images to generate
    num_images: u32,
}

/// FAL image generation response
#[derive(Debug, Deserialize)]
pub struct FluxResponse {
    /// Generated images
    pub images: Vec<FluxImage>,
}

/// One generated image reference
#[derive(Debug, Deserialize)]
pub struct FluxImage {
    /// URL the image bytes can be fetched from
    pub url: String,
}

impl Fal {
    /// Create a new FAL client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        image_size: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(180))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            image_size: image_size.into(),
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://fal.run".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Generate one image and return its hosted URL
    pub async fn generate(&self, prompt: &str) -> Result<FluxResponse> {
        let api_url = format!("{}/{}", self.base_url(), self.model);

        let request = FluxRequest {
            prompt,
            image_size: &self.image_size,
            num_images: 1,
        };

        debug!("Requesting image generation: {} chars of prompt", prompt.len());

        let response = self
            .client
            .post(&api_url)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to FAL API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("FAL API error ({}): {}", status, error_text);
            return Err(anyhow!("FAL API error ({}): {}", status, error_text));
        }

        let flux_response = response
            .json::<FluxResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse FAL API response: {}", e))?;

        Ok(flux_response)
    }

    /// Download generated image bytes from their hosted URL
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to download generated image: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Image download failed: {}", status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read image bytes: {}", e))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageSynthesis for Fal {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .generate(prompt)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let image = response.images.first().ok_or_else(|| {
            ProviderError::ParseError("FAL response contained no images".to_string())
        })?;

        self.download(&image.url)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}
