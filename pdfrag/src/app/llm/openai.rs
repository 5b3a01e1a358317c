use crate::core::llm::ChatModel;
use crate::error::PdfragError;
use crate::map_err;
use pdfrag_openai::chat::{ChatMessage, ChatRequest, OpenAiChat};

pub use pdfrag_openai::chat::GPT_3_5_TURBO as DEFAULT_CHAT_MODEL;

/// OpenAI chat completions for a single model.
#[derive(Debug)]
pub struct OpenAiChatModel {
    client: OpenAiChat,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(client: OpenAiChat, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiChatModel {
    fn id(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, PdfragError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            temperature,
        };

        Ok(map_err!(self.client.complete(&request).await))
    }
}
