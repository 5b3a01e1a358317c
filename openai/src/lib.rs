use error::{OpenAiError, OpenAiErrorResponse};
use serde::de::DeserializeOwned;
use std::error::Error;

/// Chat completions client.
pub mod chat;

/// Text embeddings client.
pub mod embeddings;

pub mod error;

pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Decode a successful response into `T`, or the OpenAI error body if the
/// request did not succeed.
async fn decode<T>(response: reqwest::Response) -> Result<T, OpenAiError>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if !status.is_success() {
        tracing::error!("Request to {} failed with status {status}", response.url());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error reading OpenAI response: {}", e);
                return Err(OpenAiError::Status {
                    status: status.as_u16(),
                    body: String::new(),
                });
            }
        };

        let error = error_from_body(status.as_u16(), body);
        tracing::error!("Response: {error}");
        return Err(error);
    }

    match response.json::<T>().await {
        Ok(res) => Ok(res),
        Err(e) => {
            tracing::error!("Error decoding OpenAI response: {}", e);
            tracing::error!("Source: {:?}", e.source());
            Err(OpenAiError::Reqwest(e))
        }
    }
}

/// Gateways in front of the API answer with plain text or HTML, in which case
/// only the status and the raw body are kept.
fn error_from_body(status: u16, body: String) -> OpenAiError {
    match serde_json::from_str::<OpenAiErrorResponse>(&body) {
        Ok(response) => OpenAiError::Api(response),
        Err(_) => OpenAiError::Status { status, body },
    }
}
