use std::error::Error as _;
use thiserror::Error;
use tracing::error;
use validify::ValidationErrors;

pub mod http;

#[derive(Debug, Error)]
pub enum PdfragErr {
    #[error("Invalid file name; {0}")]
    InvalidFileName(String),

    #[error("Unsupported file type; {0}")]
    UnsupportedFileType(String),

    #[error("Invalid embedding; {0}")]
    Embedding(String),

    #[error("Store; {0}")]
    Store(String),

    /// The store accepted a write but its response could not be read.
    #[error("Invalid store response; {0}")]
    InvalidResponse(String),

    #[error("OpenAI; {0}")]
    OpenAi(#[from] pdfrag_openai::error::OpenAiError),

    #[error("chunker: {0}")]
    Chunker(#[from] pdfrag_chunx::ChunkerError),

    #[error("IO; {0}")]
    IO(#[from] std::io::Error),

    #[error("JSON error; {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Parse pdf; {0}")]
    ParsePdf(#[from] pdfium_render::prelude::PdfiumError),

    #[error("Validation; {0}")]
    Validation(#[from] ValidationErrors),

    #[cfg(feature = "supabase")]
    #[error("Http client; {0}")]
    Reqwest(#[from] reqwest::Error),

    #[cfg(feature = "postgres")]
    #[error("SQL; {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
#[error("{error}")]
pub struct PdfragError {
    file: &'static str,
    line: u32,
    column: u32,
    pub error: PdfragErr,
}

impl PdfragError {
    pub fn new(file: &'static str, line: u32, column: u32, error: PdfragErr) -> PdfragError {
        PdfragError {
            file,
            line,
            column,
            error,
        }
    }

    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }

    pub fn print(&self) {
        let location = self.location();

        error!("{location} | {self}");

        if self.error.source().is_some() {
            error!("Causes:");
        }

        let mut src = self.error.source();
        while let Some(source) = src {
            error!(" - {source}");
            src = source.source();
        }
    }
}

#[macro_export]
macro_rules! err {
    ($ty:ident $(, $l:literal $(,)? $($args:expr),* )?) => {
        Err($crate::error::PdfragError::new(
            file!(),
            line!(),
            column!(),
            $crate::error::PdfragErr::$ty $( (format!($l, $( $args, )*)) )?,
        ))
    };
}

#[macro_export]
macro_rules! map_err {
    ($ex:expr) => {
        $ex.map_err(|e| $crate::error::PdfragError::new(file!(), line!(), column!(), e.into()))?
    };
}
