use axum::{extract::State, Json};
use tracing::debug;
use utoipa::OpenApi;

use super::{
    dto::{ErrorDto, HealthDto, LatestReadingDto},
    errors::ApiError,
    SharedStore,
};

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Fetch the most recent reading by timestamp.
///
/// Any method is accepted; the route is documented as `GET`. When several
/// rows share the newest timestamp, which one is returned is up to the
/// database.
#[utoipa::path(
    get,
    path = "/readings/latest",
    responses(
        (status = 200, description = "Most recent reading", body = LatestReadingDto,
         example = json!({ "vochtigheid": 42, "waterniveau": 68, "pomp_status": 1 })),
        (status = 404, description = "No readings stored yet", body = ErrorDto,
         example = json!({ "error": "Geen data gevonden" })),
        (status = 500, description = "Database unreachable or query failed", body = ErrorDto),
    ),
    tag = "readings"
)]
pub async fn get_latest_reading(
    State(store): State<SharedStore>,
) -> Result<Json<LatestReadingDto>, ApiError> {
    let reading = store.latest().await?.ok_or(ApiError::NoDataFound)?;
    debug!(?reading, "Serving latest reading");
    Ok(Json(reading.into()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Liveness only; the database is not contacted.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthDto),
    ),
    tag = "system"
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(get_latest_reading, health),
    components(schemas(LatestReadingDto, ErrorDto, HealthDto)),
    tags(
        (name = "readings", description = "Irrigation sensor readings"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Irrigo API",
        version = "0.1.0",
        description = "Latest humidity, water level and pump status of the Irrigo sensor"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
