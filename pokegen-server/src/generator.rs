//! Text generation behind the `/describe` endpoint.

use async_trait::async_trait;
use pokegen_model::PokemonDescription;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

/// System prompt for the initial generation.
pub static DESCRIPTION_PROMPT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "You are a helpful Pokemon professor.\n\
         The user is a Pokemon trainer seeking information.\n\
         The user will prompt you with a caption for a picture of a Pokemon.\n\
         Answer using the following schema: {}",
        PokemonDescription::json_schema()
    )
});

/// System prompt for the repair round.
pub static REPAIR_PROMPT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "You are a helpful Pokemon professor.\n\
         The input is a Pokemon description and a validation error.\n\
         The description needs to be repaired based on the error.\n\
         Leave fields not mentioned in the error unchanged.\n\
         Answer using the following schema: {}",
        PokemonDescription::json_schema()
    )
});

/// A causal text-generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for the given system and user prompts.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}

/// Drops a leading `<think>…</think>` block, which reasoning models emit
/// before the answer.
#[must_use]
pub fn strip_thinking(content: &str) -> &str {
    match content.find("</think>") {
        Some(index) => content[index + "</think>".len()..].trim(),
        None => content.trim(),
    }
}

/// Generator backed by an OpenAI-compatible chat-completion endpoint on a
/// local inference server.
pub struct ChatGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatGenerator {
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{base_url}/v1/chat/completions"),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        debug!("prompting '{}' for a completion", self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": system_prompt },
                    { "role": "user", "content": user_prompt },
                ],
            }))
            .timeout(Duration::from_secs(600))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("completion response carried no content"))?;
        Ok(strip_thinking(content).to_string())
    }
}
