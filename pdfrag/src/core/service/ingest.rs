use crate::{
    core::{
        chunk::Chunker,
        document::{parser::Parser, source::DocumentSource, SourceFile},
        model::{ChunkInsert, Document, DocumentInsert},
        provider::ProviderState,
    },
    error::{PdfragErr, PdfragError},
};
use dto::{FailurePolicy, FileOutcome, FileReport, IngestReport};
use tracing::{error, info};

/// Turns source files into stored documents and embedded chunks.
#[derive(Debug, Clone)]
pub struct IngestService {
    providers: ProviderState,
    chunker: Chunker,
    policy: FailurePolicy,
}

impl IngestService {
    pub fn new(providers: ProviderState, chunker: Chunker) -> Self {
        Self {
            providers,
            chunker,
            policy: FailurePolicy::default(),
        }
    }

    /// Set how failures of a single file affect the rest of the run.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Ingest every file the source lists, one after the other.
    ///
    /// With [FailurePolicy::Abort] the first failing file ends the run and its
    /// error is returned. Documents and chunks stored up to that point are kept.
    /// With [FailurePolicy::Isolate] the failure is recorded in the report
    /// and the run continues with the next file.
    ///
    /// * `source`: Where to read the files from.
    pub async fn ingest_source(
        &self,
        source: &(dyn DocumentSource + Send + Sync),
    ) -> Result<IngestReport, PdfragError> {
        let files = source.list().await?;

        info!(
            "Ingesting {} file(s) from '{}' source",
            files.len(),
            source.id()
        );

        let mut report = IngestReport::default();

        for file in files {
            info!("Processing: {}", file.name);

            let outcome = match self.ingest_file(source, &file).await {
                Ok(outcome) => outcome,
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        error!("Aborting ingestion at '{}'", file.name);
                        return Err(e);
                    }
                    FailurePolicy::Isolate => {
                        error!("Failed to ingest '{}'", file.name);
                        e.print();
                        FileOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                },
            };

            report.files.push(FileReport {
                file: file.name,
                outcome,
            });
        }

        Ok(report)
    }

    /// Read, parse and ingest a single file. The file name is used as the title.
    ///
    /// * `source`: Where to read the file from.
    /// * `file`: The file to ingest.
    pub async fn ingest_file(
        &self,
        source: &(dyn DocumentSource + Send + Sync),
        file: &SourceFile,
    ) -> Result<FileOutcome, PdfragError> {
        let content = self.read_text(source, file).await?;
        self.ingest_text(&file.name, &content).await
    }

    /// Read and parse a file without storing anything.
    ///
    /// * `source`: Where to read the file from.
    /// * `file`: The file to read.
    pub async fn read_text(
        &self,
        source: &(dyn DocumentSource + Send + Sync),
        file: &SourceFile,
    ) -> Result<String, PdfragError> {
        let bytes = source.read(file).await?;
        Parser::new(file.ty).parse(&bytes)
    }

    /// Chunk `content`, create a document for it and store every chunk with
    /// its embedding, in order.
    ///
    /// A rejected document insert is logged and reported as skipped. An insert the
    /// store accepted but answered with an unreadable response is returned as an
    /// error, as is any embedding or chunk insert error. Chunks stored before the
    /// error stay in place.
    ///
    /// * `title`: Document title.
    /// * `content`: Extracted document text.
    pub async fn ingest_text(&self, title: &str, content: &str) -> Result<FileOutcome, PdfragError> {
        let chunks = self.chunker.chunk(content);

        let document = match self
            .providers
            .store
            .insert_document(DocumentInsert::new(title))
            .await
        {
            Ok(document) => document,
            // The document may exist, so this is not a skip
            Err(e) if matches!(e.error, PdfragErr::InvalidResponse(_)) => return Err(e),
            Err(e) => {
                error!("Failed to insert document '{title}'");
                e.print();
                return Ok(FileOutcome::Skipped {
                    reason: e.to_string(),
                });
            }
        };

        self.store_chunks(&document, &chunks).await?;

        info!("Uploaded '{title}' with {} chunks", chunks.len());

        Ok(FileOutcome::Ingested {
            document,
            chunks: chunks.len(),
        })
    }

    async fn store_chunks(&self, document: &Document, chunks: &[String]) -> Result<(), PdfragError> {
        let ProviderState {
            store, embedder, ..
        } = &self.providers;

        for chunk in chunks {
            let embedding = embedder.embed(chunk).await?;
            store
                .insert_chunk(ChunkInsert::new(document.id, chunk, &embedding))
                .await?;
        }

        Ok(())
    }
}

/// Ingest service DTOs.
pub mod dto {
    use crate::core::model::Document;
    use serde::{Deserialize, Serialize};

    /// How a failing file affects an ingestion run.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum FailurePolicy {
        /// Stop the whole run on the first failing file.
        #[default]
        Abort,

        /// Record the failure and continue with the next file.
        Isolate,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase", tag = "status")]
    pub enum FileOutcome {
        /// The document and all of its chunks were stored.
        Ingested { document: Document, chunks: usize },

        /// The store rejected the document, nothing was stored.
        Skipped { reason: String },

        /// Reading, embedding or storing failed midway.
        /// Only reported with [FailurePolicy::Isolate].
        Failed { error: String },
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct FileReport {
        pub file: String,
        pub outcome: FileOutcome,
    }

    /// Per file results of an ingestion run, in processing order.
    #[derive(Debug, Clone, Default, Serialize)]
    pub struct IngestReport {
        pub files: Vec<FileReport>,
    }

    impl IngestReport {
        pub fn ingested(&self) -> impl Iterator<Item = &FileReport> {
            self.files
                .iter()
                .filter(|f| matches!(f.outcome, FileOutcome::Ingested { .. }))
        }

        pub fn skipped(&self) -> impl Iterator<Item = &FileReport> {
            self.files
                .iter()
                .filter(|f| matches!(f.outcome, FileOutcome::Skipped { .. }))
        }

        pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
            self.files
                .iter()
                .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
        }

        /// Total amount of chunks stored during the run.
        pub fn chunks(&self) -> usize {
            self.files
                .iter()
                .map(|f| match f.outcome {
                    FileOutcome::Ingested { chunks, .. } => chunks,
                    _ => 0,
                })
                .sum()
        }
    }
}
