use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::ChatCompletion;

/// Mistral client for interacting with the Mistral chat completions API
#[derive(Debug)]
pub struct Mistral {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model used for completions
    model: String,
    /// Sampling temperature
    temperature: f32,
}

/// Mistral chat completion request
#[derive(Debug, Serialize)]
pub struct MistralRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<MistralMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Mistral message format
#[derive(Debug, Serialize, Deserialize)]
pub struct MistralMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Mistral chat completion response
#[derive(Debug, Deserialize)]
pub struct MistralResponse {
    /// Completion choices
    pub choices: Vec<MistralChoice>,

    /// Token usage information
    pub usage: Option<MistralUsage>,
}

/// Individual choice in a Mistral response
#[derive(Debug, Deserialize)]
pub struct MistralChoice {
    /// The generated message
    pub message: MistralMessage,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct MistralUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

impl MistralRequest {
    /// Create a new Mistral request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(MistralMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl Mistral {
    /// Create a new Mistral client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            temperature,
        }
    }

    /// Complete a chat completion request
    pub async fn complete(&self, request: MistralRequest) -> Result<MistralResponse> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.mistral.ai/v1/chat/completions".to_string()
        } else {
            format!(
                "{}/v1/chat/completions",
                self.endpoint.trim_end_matches('/')
            )
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to Mistral API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Mistral API error ({}): {}", status, error_text);
            return Err(anyhow!("Mistral API error ({}): {}", status, error_text));
        }

        let mistral_response = response
            .json::<MistralResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse Mistral API response: {}", e))?;

        Ok(mistral_response)
    }

    /// Test the connection to the Mistral API
    pub async fn test_connection(&self) -> Result<()> {
        let request = MistralRequest::new(&self.model)
            .max_tokens(10)
            .add_message("user", "Hello");

        self.complete(request).await?;
        Ok(())
    }

    /// Extract text from a Mistral response
    pub fn extract_text_from_response(response: &MistralResponse) -> String {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletion for Mistral {
    async fn complete_chat(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut request = MistralRequest::new(&self.model).temperature(self.temperature);
        if let Some(system) = system {
            request = request.add_message("system", system);
        }
        request = request.add_message("user", prompt);

        let response = self
            .complete(request)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let text = Self::extract_text_from_response(&response);
        if text.is_empty() {
            return Err(ProviderError::ParseError(
                "Mistral response contained no choices".to_string(),
            ));
        }
        Ok(text)
    }
}
