use crate::{
    core::document::{source::DocumentSource, SourceFile},
    error::PdfragError,
    map_err,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads documents from a single directory. Subdirectories are ignored.
///
/// Files ending in `.pdf`, `.txt` or `.md`, in any letter case, are listed.
/// Everything else is skipped, so a `README.md` next to the PDFs is ingested
/// as a text document.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    /// The directory to read the documents from.
    base: PathBuf,
}

impl FsDocumentSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let base = path.as_ref().to_path_buf();
        info!("Initialising fs source at {}", base.display());
        Self { base }
    }
}

#[async_trait::async_trait]
impl DocumentSource for FsDocumentSource {
    fn id(&self) -> &'static str {
        "fs"
    }

    async fn list(&self) -> Result<Vec<SourceFile>, PdfragError> {
        let mut entries = map_err!(tokio::fs::read_dir(&self.base).await);
        let mut files = vec![];

        while let Some(entry) = map_err!(entries.next_entry().await) {
            let path = entry.path();

            if !map_err!(entry.file_type().await).is_file() {
                debug!("Skipping {}, not a file", path.display());
                continue;
            }

            match SourceFile::from_path(path.clone()) {
                Ok(file) => files.push(file),
                Err(e) => debug!("Skipping {}; {e}", path.display()),
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(files)
    }

    async fn read(&self, file: &SourceFile) -> Result<Vec<u8>, PdfragError> {
        debug!("Reading {}", file.path.display());
        Ok(map_err!(tokio::fs::read(&file.path).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DocumentType;

    #[tokio::test]
    async fn lists_recognized_files_in_order() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(dir.path().join("b.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"text").unwrap();
        std::fs::write(dir.path().join("c.MD"), b"# md").unwrap();
        std::fs::write(dir.path().join("data.csv"), b"1,2").unwrap();
        std::fs::write(dir.path().join("README"), b"readme").unwrap();
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        std::fs::write(dir.path().join("nested.pdf").join("inner.pdf"), b"%PDF").unwrap();

        let source = FsDocumentSource::new(dir.path());
        let files = source.list().await.unwrap();

        let names = files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["a.txt", "b.pdf", "c.MD"], names);

        assert_eq!(DocumentType::Text, files[0].ty);
        assert_eq!(DocumentType::Pdf, files[1].ty);
        assert_eq!(DocumentType::Text, files[2].ty);

        assert_eq!(b"text".to_vec(), source.read(&files[0]).await.unwrap());
    }

    #[tokio::test]
    async fn missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsDocumentSource::new(dir.path().join("missing"));

        assert!(source.list().await.is_err());
    }

    #[tokio::test]
    async fn lists_markdown_readme_next_to_pdfs() {
        let dir = tempfile::tempdir().unwrap();

        std::fs::write(dir.path().join("report.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("README.md"), b"# notes").unwrap();

        let files = FsDocumentSource::new(dir.path()).list().await.unwrap();

        let names = files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["README.md", "report.pdf"], names);
        assert_eq!(DocumentType::Text, files[0].ty);
    }
}
