use crate::{
    core::{
        model::{ChunkInsert, ChunkMatch, Document, DocumentInsert, MatchQuery},
        store::ChunkStore,
    },
    error::PdfragError,
    map_err,
};
use sqlx::PgPool;
use tracing::info;

pub async fn init(url: &str) -> PgPool {
    let pool = sqlx::postgres::PgPool::connect(url)
        .await
        .expect("error while connecting to db");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("error in migrations");

    info!("Connected to postgres");
    pool
}

/// pgvector accepts vectors in their text form, `[1,2,3]`.
fn vector_literal(embedding: &[f64]) -> String {
    let values = embedding
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{values}]")
}

#[async_trait::async_trait]
impl ChunkStore for PgPool {
    fn id(&self) -> &'static str {
        "postgres"
    }

    async fn insert_document(
        &self,
        document: DocumentInsert<'_>,
    ) -> Result<Document, PdfragError> {
        Ok(map_err!(
            sqlx::query_as::<_, Document>(
                "INSERT INTO document (title) VALUES ($1) RETURNING id, title"
            )
            .bind(document.title)
            .fetch_one(self)
            .await
        ))
    }

    async fn insert_chunk(&self, chunk: ChunkInsert<'_>) -> Result<(), PdfragError> {
        map_err!(
            sqlx::query(
                "INSERT INTO chunks (document_id, chunk_text, embedding) VALUES ($1, $2, $3::vector)"
            )
            .bind(chunk.document_id)
            .bind(chunk.chunk_text)
            .bind(vector_literal(chunk.embedding))
            .execute(self)
            .await
        );
        Ok(())
    }

    async fn match_chunks(&self, query: MatchQuery<'_>) -> Result<Vec<ChunkMatch>, PdfragError> {
        Ok(map_err!(
            sqlx::query_as::<_, ChunkMatch>(
                "SELECT document_id, chunk_text, similarity FROM match_chunks($1::vector, $2, $3)"
            )
            .bind(vector_literal(query.embedding))
            .bind(query.threshold)
            .bind(i32::try_from(query.count).unwrap_or(i32::MAX))
            .fetch_all(self)
            .await
        ))
    }

    async fn list_documents(&self) -> Result<Vec<Document>, PdfragError> {
        Ok(map_err!(
            sqlx::query_as::<_, Document>("SELECT id, title FROM document")
                .fetch_all(self)
                .await
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::vector_literal;

    #[test]
    fn vector_literal_is_bracketed() {
        assert_eq!("[1,-0.5,0]", vector_literal(&[1.0, -0.5, 0.0]));
        assert_eq!("[]", vector_literal(&[]));
    }
}
