//! Http specific DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validify::Validify;

/// A question about the ingested documents.
#[derive(Debug, Deserialize, Validify, ToSchema)]
pub(crate) struct AskPayload {
    /// The question to answer. Cannot be empty.
    #[modify(trim)]
    #[validate(length(min = 1))]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AskResponse {
    /// The model's answer, or a fixed notice if no relevant chunks were found.
    pub answer: String,
}
