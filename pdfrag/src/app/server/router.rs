use super::{
    api::ApiDoc,
    dto::{AskPayload, AskResponse},
};
use crate::{app::state::ServiceState, error::PdfragError, map_err};
use axum::{
    extract::State,
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::time::Duration;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;
use utoipa::OpenApi;
use validify::Validify;

pub fn router(state: ServiceState, origins: Vec<String>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(origins))
        .allow_headers(Any)
        .allow_methods(Any);

    service_api(state)
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http().on_failure(
            |error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                tracing::error!("{error}")
            },
        ))
        .layer(cors)
}

/// `*` anywhere in the list allows any origin.
fn allow_origin(origins: Vec<String>) -> AllowOrigin {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        tracing::debug!("Allowing any origin");
        return AllowOrigin::any();
    }

    let origins = origins.into_iter().filter_map(|origin| {
        tracing::debug!("Adding {origin} to allowed origins");
        match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid origin '{origin}'; {e}");
                None
            }
        }
    });

    AllowOrigin::list(origins)
}

fn service_api(state: ServiceState) -> Router {
    Router::new()
        .route("/_health", get(health_check))
        .route("/ask", post(ask))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/_health",
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
pub(super) async fn health_check() -> impl IntoResponse {
    "OK"
}

#[utoipa::path(
    post,
    path = "/ask",
    responses(
        (status = 200, description = "Answer to the question", body = AskResponse),
        (status = 422, description = "Empty question"),
        (status = 500, description = "Internal server error")
    ),
    request_body = AskPayload
)]
pub(super) async fn ask(
    state: State<ServiceState>,
    Json(mut payload): Json<AskPayload>,
) -> Result<Json<AskResponse>, PdfragError> {
    map_err!(payload.validify());

    let answer = state.query.ask(&payload.question).await?;

    Ok(Json(AskResponse { answer }))
}

async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
