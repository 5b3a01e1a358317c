use super::SourceFile;
use crate::error::PdfragError;

/// Provides the files ingestion reads from.
/// Serves as indirection to decouple the documents from their location.
#[async_trait::async_trait]
pub trait DocumentSource {
    fn id(&self) -> &'static str;

    /// List every file with a recognized document type, in a stable order.
    async fn list(&self) -> Result<Vec<SourceFile>, PdfragError>;

    /// Read the raw contents of `file`.
    ///
    /// * `file`: A file obtained from [DocumentSource::list].
    async fn read(&self, file: &SourceFile) -> Result<Vec<u8>, PdfragError>;
}
