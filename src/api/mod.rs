pub mod dto;
pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::{any, get},
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::db::ReadingStore;
use handlers::ApiDoc;

/// Store handle shared by all requests.
pub type SharedStore = Arc<dyn ReadingStore>;

pub fn router(store: SharedStore) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // No method restriction: every verb gets the same JSON answer.
        .route("/readings/latest", any(handlers::get_latest_reading))
        // Path of the script older dashboards still poll.
        .route("/endpoint.php", any(handlers::get_latest_reading))
        .with_state(store)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(middleware::map_response(allow_any_origin))
}

/// Dashboards are served from other origins; every response is readable
/// from any of them.
async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
