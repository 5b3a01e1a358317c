use super::{PdfragErr, PdfragError};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

impl PdfragError {
    pub fn status(&self) -> StatusCode {
        use PdfragErr as E;
        use StatusCode as SC;
        match self.error {
            E::Validation(_)
            | E::InvalidFileName(_)
            | E::UnsupportedFileType(_)
            | E::Chunker(_) => SC::UNPROCESSABLE_ENTITY,
            E::Embedding(_)
            | E::Store(_)
            | E::InvalidResponse(_)
            | E::OpenAi(_)
            | E::IO(_)
            | E::SerdeJson(_)
            | E::ParsePdf(_) => SC::INTERNAL_SERVER_ERROR,

            #[cfg(feature = "supabase")]
            E::Reqwest(_) => SC::INTERNAL_SERVER_ERROR,

            #[cfg(feature = "postgres")]
            E::Sqlx(_) => SC::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response wrapper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseError<T: Serialize> {
    error_type: ErrorType,
    body: T,
}

impl<T> ResponseError<T>
where
    T: Serialize,
{
    pub fn new(error_type: ErrorType, body: T) -> Self {
        Self { error_type, body }
    }
}

#[derive(Debug, Serialize)]
enum ErrorType {
    Internal,
    Api,
}

impl<T> IntoResponse for ResponseError<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        <Json<ResponseError<T>> as IntoResponse>::into_response(Json(self))
    }
}

impl IntoResponse for PdfragError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        self.print();

        use ErrorType as ET;
        use PdfragErr as PE;

        match self.error {
            PE::Validation(errors) => (status, ResponseError::new(ET::Api, errors)).into_response(),

            PE::InvalidFileName(e) | PE::UnsupportedFileType(e) => {
                (status, ResponseError::new(ET::Api, e)).into_response()
            }

            PE::Chunker(e) => (status, ResponseError::new(ET::Api, e.to_string())).into_response(),

            PE::OpenAi(_) => (
                status,
                ResponseError::new(ET::Internal, "language model provider".to_string()),
            )
                .into_response(),

            PE::Store(_) | PE::InvalidResponse(_) => (
                status,
                ResponseError::new(ET::Internal, "document store".to_string()),
            )
                .into_response(),

            #[cfg(feature = "supabase")]
            PE::Reqwest(_) => (
                status,
                ResponseError::new(ET::Internal, "http client".to_string()),
            )
                .into_response(),

            #[cfg(feature = "postgres")]
            PE::Sqlx(_) => (
                status,
                ResponseError::new(ET::Internal, "database".to_string()),
            )
                .into_response(),

            PE::Embedding(_)
            | PE::IO(_)
            | PE::SerdeJson(_)
            | PE::ParsePdf(_) => {
                (status, ResponseError::new(ET::Internal, "internal".to_string())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: PdfragErr) -> PdfragError {
        PdfragError::new(file!(), line!(), column!(), kind)
    }

    #[test]
    fn status_by_kind() {
        assert_eq!(
            StatusCode::UNPROCESSABLE_ENTITY,
            error(PdfragErr::UnsupportedFileType("docx".to_string())).status()
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            error(PdfragErr::Embedding("no vector".to_string())).status()
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            error(PdfragErr::InvalidResponse("id".to_string())).status()
        );
    }
}
