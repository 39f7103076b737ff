use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The three output columns of one `metingen` (measurements) row.
///
/// Values are stored on the sensor's own scale and passed through as-is;
/// nothing here validates units or ranges.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Reading {
    /// Soil humidity.
    pub vochtigheid: i32,
    /// Water level in the reservoir.
    pub waterniveau: i32,
    /// Pump state: 0 = off, 1 = on.
    pub pomp_status: i32,
}
