use super::{
    dto::{AskPayload, AskResponse},
    router::{__path_ask, __path_health_check},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(ask, health_check),
    components(schemas(AskPayload, AskResponse)),
    tags(
        (name = "pdfrag", description = "Question answering over ingested documents")
    )
)]
pub struct ApiDoc;
