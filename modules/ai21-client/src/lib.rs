pub mod error;
pub mod types;

pub use error::{Ai21Error, Result};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};

const AI21_API_URL: &str = "https://api.ai21.com/studio/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "jamba-mini";

pub struct Ai21Client {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Ai21Client {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: AI21_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat request and return the decoded response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %request.model, "AI21 chat request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Ai21Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// One-shot completion: a single user message, returning the reply
    /// text of the first choice.
    pub async fn chat_completion(
        &self,
        prompt: impl Into<String>,
        temperature: f32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(temperature),
            max_tokens: None,
        };

        let response = self.chat(&request).await?;
        response
            .text()
            .map(String::from)
            .ok_or(Ai21Error::EmptyResponse)
    }
}
