use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Flat row as stored in `itineraries`.
#[derive(Debug, FromRow)]
pub struct ItineraryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub address: String,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoKind {
    Point,
}

/// GeoJSON-style point; `coordinates` is `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: GeoKind,
    pub coordinates: [f64; 2],
    pub address: String,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64, address: String) -> Self {
        Self {
            kind: GeoKind::Point,
            coordinates: [lng, lat],
            address,
        }
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: Uuid,
    pub name: String,
    pub location: GeoPoint,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    #[serde(rename = "tripID")]
    pub trip_id: Option<Uuid>,
}

/// Itinerary ready to insert. `trip_id` is `None` when the slug matched no trip.
#[derive(Debug, Clone)]
pub struct NewItinerary {
    pub name: String,
    pub location: GeoPoint,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub user_id: Uuid,
    pub trip_id: Option<Uuid>,
}

impl From<ItineraryRow> for Itinerary {
    fn from(r: ItineraryRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            location: GeoPoint::new(r.lng, r.lat, r.address),
            start_date: r.start_date,
            end_date: r.end_date,
            user_id: r.user_id,
            trip_id: r.trip_id,
        }
    }
}
