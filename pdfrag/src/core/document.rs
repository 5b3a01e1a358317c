use crate::{err, error::PdfragError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Document parsers.
pub mod parser;

/// Document sources.
pub mod source;

/// All file types ingestion recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Pdf,
    Text,
}

impl DocumentType {
    /// Get the document type from a file name, if it has a recognized extension.
    pub fn from_file_name(name: &str) -> Result<Self, PdfragError> {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return err!(InvalidFileName, "missing extension: {name}");
        };
        Self::try_from(ext)
    }
}

impl TryFrom<&str> for DocumentType {
    type Error = PdfragError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" | "md" => Ok(Self::Text),
            _ => err!(UnsupportedFileType, "{value}"),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A file available for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, used as the document title.
    pub name: String,

    pub path: PathBuf,

    pub ty: DocumentType,
}

impl SourceFile {
    /// Create a source file from a path whose file name has a recognized extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, PdfragError> {
        let path = path.into();

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return err!(InvalidFileName, "{}", path.display());
        };

        let ty = DocumentType::from_file_name(name)?;

        Ok(Self {
            name: name.to_string(),
            path: path.clone(),
            ty,
        })
    }
}
