use crate::{decode, error::OpenAiError, DEFAULT_OPENAI_ENDPOINT};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";

pub struct OpenAiChat {
    endpoint: String,
    key: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

impl OpenAiChat {
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(DEFAULT_OPENAI_ENDPOINT, api_key)
    }

    pub fn with_endpoint(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send the messages and return the content of the first choice.
    pub async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, OpenAiError> {
        if request.messages.is_empty() {
            return Err(OpenAiError::InvalidInput(
                "at least one message is required".to_string(),
            ));
        }

        let response = match self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .bearer_auth(&self.key)
            .json(request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in OpenAI request: {e}");
                return Err(OpenAiError::Reqwest(e));
            }
        };

        let response = decode::<ChatResponse>(response).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completed with '{}', used tokens {}-{}-{} (prompt-completion-total)",
                response.model,
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OpenAiError::EmptyResponse(format!("no choices from '{}'", response.model)))
    }
}

impl std::fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_request() {
        let request = ChatRequest {
            model: GPT_3_5_TURBO,
            messages: vec![ChatMessage::user("Hello")],
            temperature: 0.2,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "Hello" }],
                "temperature": 0.2
            }),
            json
        );
    }

    #[test]
    fn decodes_response() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "  Inflation is rising prices. " },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21 }
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            Some("  Inflation is rising prices. "),
            response.choices[0].message.content.as_deref()
        );
        assert_eq!(21, response.usage.unwrap().total_tokens);
    }

    #[tokio::test]
    async fn rejects_empty_messages() {
        let chat = OpenAiChat::with_endpoint("http://localhost:1", "key");
        let request = ChatRequest {
            model: GPT_3_5_TURBO,
            messages: vec![],
            temperature: 0.2,
        };

        let result = chat.complete(&request).await;

        assert!(matches!(result, Err(OpenAiError::InvalidInput(_))));
    }
}
