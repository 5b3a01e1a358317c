/// Document ingestion.
pub mod ingest;

/// Question answering.
pub mod query;
