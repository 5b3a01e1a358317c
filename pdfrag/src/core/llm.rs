use crate::error::PdfragError;

/// Language models answering prompts.
#[async_trait::async_trait]
pub trait ChatModel {
    fn id(&self) -> &'static str;

    /// Send `prompt` as a single user message and return the model's reply.
    ///
    /// * `prompt`: The full prompt.
    /// * `temperature`: Sampling temperature.
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String, PdfragError>;
}
