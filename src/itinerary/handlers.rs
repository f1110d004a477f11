use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info, instrument, warn};

use super::dto::AddItineraryRequest;
use super::repo_types::{GeoPoint, Itinerary, NewItinerary};
use crate::{state::AppState, trips::dto::OwnerQuery};

pub fn itinerary_routes() -> Router<AppState> {
    Router::new().route(
        "/trips/:slug/itinerary",
        get(get_itinerary).post(add_itinerary),
    )
}

/// POST /api/trips/:slug/itinerary?userID=
///
/// A slug that matches no trip for this user still creates the entry, with
/// `tripID` left null. A malformed query or body is rejected like any other
/// failed write: a bare 500.
#[instrument(skip(state, query, body))]
pub async fn add_itinerary(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
    body: Result<Json<AddItineraryRequest>, JsonRejection>,
) -> Result<Json<Itinerary>, StatusCode> {
    let (Query(q), Json(body)) = match (query, body) {
        (Ok(q), Ok(b)) => (q, b),
        (Err(e), _) => {
            warn!(error = %e, %slug, "rejected itinerary query");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        (_, Err(e)) => {
            warn!(error = %e, %slug, "rejected itinerary body");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let trip = state
        .trips
        .find_by_slug(q.user_id, &slug)
        .await
        .map_err(|e| {
            error!(error = %e, %slug, "trip lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    if trip.is_none() {
        debug!(%slug, "no trip for slug; saving itinerary without trip");
    }

    let new = NewItinerary {
        name: body.name,
        location: GeoPoint::new(body.lng, body.lat, body.location),
        start_date: body.start_date,
        end_date: body.end_date,
        user_id: q.user_id,
        trip_id: trip.map(|t| t.id),
    };

    let saved = state.itineraries.insert(new).await.map_err(|e| {
        error!(error = %e, %slug, "insert itinerary failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!(itinerary_id = %saved.id, trip_id = ?saved.trip_id, "itinerary created");
    Ok(Json(saved))
}

/// GET /api/trips/:slug/itinerary?userID=
///
/// A `userID` that is not a valid id cannot own a trip, so it is a 404.
#[instrument(skip(state, query))]
pub async fn get_itinerary(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<OwnerQuery>, QueryRejection>,
) -> Result<Json<Vec<Itinerary>>, StatusCode> {
    let Ok(Query(q)) = query else {
        debug!(%slug, "unparseable userID; no trip can match");
        return Err(StatusCode::NOT_FOUND);
    };

    let trip = match state.trips.find_by_slug(q.user_id, &slug).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(error = %e, %slug, "trip lookup failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let items = state
        .itineraries
        .list_by_trip(q.user_id, trip.id)
        .await
        .map_err(|e| {
            error!(error = %e, trip_id = %trip.id, "list itineraries failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(items))
}
