use super::DocumentType;
use crate::error::PdfragError;
use pdf::PdfParser;
use text::TextParser;

pub mod pdf;
pub mod text;

/// Enumeration of all supported parser types.
#[derive(Debug)]
pub enum Parser {
    Text(TextParser),
    Pdf(PdfParser),
}

impl Parser {
    /// Returns the default parser for a document.
    pub fn new(ty: DocumentType) -> Self {
        match ty {
            DocumentType::Text => Self::Text(TextParser),
            DocumentType::Pdf => Self::Pdf(PdfParser),
        }
    }

    /// Extract the text content of `input`.
    pub fn parse(&self, input: &[u8]) -> Result<String, PdfragError> {
        match self {
            Self::Text(p) => p.parse(input),
            Self::Pdf(p) => p.parse(input),
        }
    }
}
