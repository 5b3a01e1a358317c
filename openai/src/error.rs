use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("empty response: {0}")]
    EmptyResponse(String),

    #[error("http client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Api(#[from] OpenAiErrorResponse),

    /// A non success response whose body is not an OpenAI error.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Deserialize, Error)]
#[error("{message}, type: {r#type}, param: {param:?}, code: {code:?}")]
pub struct OpenAiErrorParams {
    pub message: String,
    pub r#type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Error)]
#[error("Open AI error response {{ {error} }}")]
pub struct OpenAiErrorResponse {
    pub error: OpenAiErrorParams,
}
