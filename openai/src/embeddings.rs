use crate::{decode, error::OpenAiError, DEFAULT_OPENAI_ENDPOINT};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TEXT_EMBEDDING_3_LARGE: &str = "text-embedding-3-large";
pub const TEXT_EMBEDDING_3_SMALL: &str = "text-embedding-3-small";
pub const TEXT_EMBEDDING_ADA_002: &str = "text-embedding-ada-002";

pub struct OpenAiEmbeddings {
    endpoint: String,
    key: String,
    client: reqwest::Client,
}

impl OpenAiEmbeddings {
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

    /// Embed every element of `input` with `model`. The output vectors are in
    /// the same order as the input.
    pub async fn embed(
        &self,
        input: &[&str],
        model: &str,
    ) -> Result<Vec<Vec<f64>>, OpenAiError> {
        if input.is_empty() {
            return Err(OpenAiError::InvalidInput(format!(
                "cannot be empty (len = {})",
                input.len()
            )));
        }

        let request = EmbeddingRequest {
            model,
            input: input.to_vec(),
        };

        let response = match self
            .client
            .post(format!("{}/v1/embeddings", self.endpoint))
            .bearer_auth(&self.key)
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in OpenAI request: {e}");
                return Err(OpenAiError::Reqwest(e));
            }
        };

        let mut response = decode::<EmbeddingResponse>(response).await?;

        debug!(
            "Embedded {} chunk(s) with '{}', used tokens {}-{} (prompt-total)",
            input.len(),
            response.model,
            response.usage.prompt_tokens,
            response.usage.total_tokens
        );

        response.data.sort_by_key(|o| o.index);

        Ok(response.data.into_iter().map(|o| o.embedding).collect())
    }
}

impl std::fmt::Debug for OpenAiEmbeddings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbeddings")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingObject>,
    model: String,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct EmbeddingObject {
    embedding: Vec<f64>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    total_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_request() {
        let request = EmbeddingRequest {
            model: TEXT_EMBEDDING_ADA_002,
            input: vec!["What is inflation?"],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            serde_json::json!({
                "model": "text-embedding-ada-002",
                "input": ["What is inflation?"]
            }),
            json
        );
    }

    #[test]
    fn decodes_response() {
        let body = r#"{
            "object": "list",
            "data": [
                { "object": "embedding", "embedding": [0.5, -0.25], "index": 1 },
                { "object": "embedding", "embedding": [0.1, 0.2], "index": 0 }
            ],
            "model": "text-embedding-ada-002-v2",
            "usage": { "prompt_tokens": 8, "total_tokens": 8 }
        }"#;

        let mut response: EmbeddingResponse = serde_json::from_str(body).unwrap();
        response.data.sort_by_key(|o| o.index);

        assert_eq!(vec![0.1, 0.2], response.data[0].embedding);
        assert_eq!(vec![0.5, -0.25], response.data[1].embedding);
        assert_eq!(8, response.usage.total_tokens);
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let embeddings = OpenAiEmbeddings::with_endpoint("http://localhost:1", "key");
        let result = embeddings.embed(&[], TEXT_EMBEDDING_ADA_002).await;

        assert!(matches!(result, Err(OpenAiError::InvalidInput(_))));
    }
}
