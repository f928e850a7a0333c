use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use sms_core::ApiResponse;
use sms_web_generic::{DispatchProcessor, ResponseConverter};

/// Request body limit used by [`router`].
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub processor: DispatchProcessor,
}

/// Axum-specific response converter
pub struct AxumResponseConverter;

impl ResponseConverter for AxumResponseConverter {
    type ResponseType = Response;

    fn from_api_response(response: ApiResponse) -> Self::ResponseType {
        let status = StatusCode::from_u16(response.status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, response.content_type)],
            response.body,
        )
            .into_response()
    }
}

/// Handler: POST /send-sms
pub async fn send_sms(State(state): State<AppState>, body: Bytes) -> Response {
    let response = state.processor.process_send(&body).await;
    AxumResponseConverter::from_api_response(response)
}

/// Handler: POST /send-bulk-sms
pub async fn send_bulk_sms(State(state): State<AppState>, body: Bytes) -> Response {
    let response = state.processor.process_bulk_send(&body).await;
    AxumResponseConverter::from_api_response(response)
}

/// Handler: GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    AxumResponseConverter::from_api_response(state.processor.health())
}

async fn method_not_allowed() -> Response {
    AxumResponseConverter::from_api_response(DispatchProcessor::method_not_allowed())
}

/// Router with all endpoints and the default body limit.
pub fn router(state: AppState) -> Router {
    router_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

pub fn router_with_body_limit(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/send-sms", post(send_sms))
        .route("/send-bulk-sms", post(send_bulk_sms))
        .route("/health", get(health))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}
