mod client;
pub(crate) mod types;

use anyhow::{anyhow, Result};

use client::OpenAiClient;

/// Base URL for Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

// =============================================================================
// OpenAi Agent
// =============================================================================

/// OpenAI-compatible client. Point it at another provider with `with_base_url`.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
}

/// Sampling knobs for a single chat completion.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 4096,
        }
    }
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    /// Groq-hosted model via the OpenAI-compatible endpoint.
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(api_key, model).with_base_url(GROQ_BASE_URL)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    // =========================================================================
    // Convenience methods
    // =========================================================================

    /// Chat completion with explicit temperature and token budget.
    pub async fn chat_completion_with(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
        options: ChatOptions,
    ) -> Result<String> {
        let mut request = types::ChatRequest::new(&self.model)
            .message(types::WireMessage::system(system))
            .message(types::WireMessage::user(user));

        if types::uses_max_completion_tokens(&self.model) {
            request = request.max_completion_tokens(options.max_tokens);
        } else {
            request = request
                .max_tokens(options.max_tokens)
                .temperature(options.temperature);
        }

        let response = self.client().chat(&request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("No response from {}", self.model))
    }

    /// Single-turn call to the Responses API with a reasoning effort
    /// (`low`, `medium`, `high`). Returns the first output text.
    pub async fn reason(&self, input: impl Into<String>, effort: &str) -> Result<String> {
        let request = types::ResponsesRequest {
            model: self.model.clone(),
            input: input.into(),
            reasoning: Some(types::Reasoning {
                effort: effort.to_string(),
            }),
        };

        let response = self.client().respond(&request).await?;

        response
            .output_text()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("No response text found from {}", self.model))
    }
}
