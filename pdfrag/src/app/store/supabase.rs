use crate::{
    core::{
        model::{ChunkInsert, ChunkMatch, Document, DocumentInsert, MatchQuery},
        store::ChunkStore,
    },
    err,
    error::PdfragError,
    map_err,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

const DOCUMENT_TABLE: &str = "document";
const CHUNK_TABLE: &str = "chunks";
const MATCH_FUNCTION: &str = "match_chunks";

/// Supabase store accessed through its PostgREST API.
///
/// Expects the `document` and `chunks` tables and the `match_chunks`
/// function from the migrations to exist in the project. `document.id` must be
/// a `uuid` column; the `bigint` identity Supabase creates by default is rejected
/// after the row is written.
pub struct SupabaseStore {
    url: String,
    key: String,
    client: reqwest::Client,
}

pub fn init(url: &str, key: &str) -> SupabaseStore {
    let store = SupabaseStore::new(url, key);
    info!("Initialised supabase store at {}", store.url);
    store
}

impl SupabaseStore {
    pub fn new(url: &str, key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/rest/v1/{path}", self.url))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/rest/v1/{path}", self.url))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }
}

/// Turn a non success response into a store error.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, PdfragError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    err!(Store, "{status}: {body}")
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PdfragError> {
    let response = check(response).await?;
    Ok(map_err!(response.json::<T>().await))
}

/// Read the document PostgREST returned for an insert with `return=representation`.
fn inserted_document(body: &str) -> Result<Document, PdfragError> {
    let rows = match serde_json::from_str::<Vec<Document>>(body) {
        Ok(rows) => rows,
        Err(e) => return err!(InvalidResponse, "'{DOCUMENT_TABLE}' row {body}; {e}"),
    };

    match rows.into_iter().next() {
        Some(document) => Ok(document),
        None => err!(InvalidResponse, "insert into '{DOCUMENT_TABLE}' returned no rows"),
    }
}

#[derive(Debug, Serialize)]
struct MatchParams<'a> {
    query_embedding: &'a [f64],
    match_threshold: f64,
    match_count: usize,
}

#[async_trait::async_trait]
impl ChunkStore for SupabaseStore {
    fn id(&self) -> &'static str {
        "supabase"
    }

    async fn insert_document(
        &self,
        document: DocumentInsert<'_>,
    ) -> Result<Document, PdfragError> {
        let response = map_err!(
            self.post(DOCUMENT_TABLE)
                .header("Prefer", "return=representation")
                .json(&document)
                .send()
                .await
        );

        let response = check(response).await?;

        // The row exists from here on
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return err!(InvalidResponse, "{e}"),
        };

        inserted_document(&body)
    }

    async fn insert_chunk(&self, chunk: ChunkInsert<'_>) -> Result<(), PdfragError> {
        let response = map_err!(self.post(CHUNK_TABLE).json(&chunk).send().await);
        check(response).await?;
        Ok(())
    }

    async fn match_chunks(&self, query: MatchQuery<'_>) -> Result<Vec<ChunkMatch>, PdfragError> {
        let params = MatchParams {
            query_embedding: query.embedding,
            match_threshold: query.threshold,
            match_count: query.count,
        };

        let response = map_err!(
            self.post(&format!("rpc/{MATCH_FUNCTION}"))
                .json(&params)
                .send()
                .await
        );

        let matches = decode::<Vec<ChunkMatch>>(response).await?;

        debug!("'{MATCH_FUNCTION}' returned {} row(s)", matches.len());

        Ok(matches)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, PdfragError> {
        let response = map_err!(
            self.get(DOCUMENT_TABLE)
                .query(&[("select", "id,title")])
                .send()
                .await
        );

        decode(response).await
    }
}

impl std::fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("url", &self.url)
            .finish()
    }
}
