use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::Reading;

/// Latest measurement as served to dashboards. The timestamp used to pick
/// the row is deliberately left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LatestReadingDto {
    /// Soil humidity, on the sensor's own scale.
    pub vochtigheid: i32,
    /// Reservoir water level, on the sensor's own scale.
    pub waterniveau: i32,
    /// 0 = pump off, 1 = pump on.
    pub pomp_status: i32,
}

impl From<Reading> for LatestReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            vochtigheid: r.vochtigheid,
            waterniveau: r.waterniveau,
            pomp_status: r.pomp_status,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    /// Crate version of the running binary.
    pub version: String,
}
