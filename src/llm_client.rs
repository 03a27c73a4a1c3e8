use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::errors::RoastError;
use crate::models::request::ChatCompletionCreate;
use crate::models::response_direct::ChatCompletion;

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, RoastError>;
}

pub struct LLMClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error: Option<ProviderErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

fn provider_error_message(body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(ProviderErrorBody {
            error: Some(detail),
            ..
        }) => detail.message,
        Ok(ProviderErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.to_string(),
    }
}

impl LLMClient {
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn request_chat_completion(
        &self,
        request: &ChatCompletionCreate,
    ) -> Result<ChatCompletion, RoastError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, "/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(RoastError::ApiError(format!(
                "status {status}, text {}",
                provider_error_message(&text)
            )));
        }

        let body = response.bytes().await?;
        let completion: ChatCompletion = serde_json::from_slice(&body)?;
        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for LLMClient {
    async fn complete(&self, prompt: &str) -> Result<String, RoastError> {
        let request = ChatCompletionCreate::user_prompt(&self.model, prompt);
        log::debug!("requesting completion from {}", self.model);

        let completion = self.request_chat_completion(&request).await?;
        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| RoastError::ParseError("completion has no message content".to_string()))
    }
}
