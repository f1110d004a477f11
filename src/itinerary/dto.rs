use serde::Deserialize;
use time::OffsetDateTime;

/// POST body. `location` carries the street address; coordinates come from `lng`/`lat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItineraryRequest {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
}
