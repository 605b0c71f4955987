use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Upper bound on a single completion call; the upload and retrieval calls
/// rely on transport defaults instead.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

/// Client for the OpenAI-style chat-completion endpoint.
pub struct LlmService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl LlmService {
    pub fn new(client: Client, endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
        }
    }

    /// Sends the composed prompt with a short system-role reinforcement and
    /// returns the extracted answer text.
    pub async fn complete(&self, system_message: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_message.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(COMPLETION_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("LLM API error: {}", error_text));
        }

        let raw: Value = response.json().await?;
        Ok(extract_answer(&raw))
    }
}

/// Pulls `choices[0].message.content` out of a completion reply. When the
/// reply doesn't have that shape, the whole raw body is serialized as the
/// answer so the caller still sees what came back.
pub fn extract_answer(raw: &Value) -> String {
    raw.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}
