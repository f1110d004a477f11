use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use super::dto::{CreateTripRequest, OwnerQuery};
use super::repo::Trip;
use crate::db::is_unique_violation;
use crate::state::AppState;

pub fn trip_routes() -> Router<AppState> {
    Router::new().route("/trips", get(list_trips).post(create_trip))
}

/// Lowercase, runs of anything non-alphanumeric collapsed to one `-`.
pub(crate) fn slugify(input: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }
    NON_ALNUM
        .replace_all(&input.trim().to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

#[instrument(skip(state))]
pub async fn create_trip(
    State(state): State<AppState>,
    Query(q): Query<OwnerQuery>,
    Json(body): Json<CreateTripRequest>,
) -> Result<Json<Trip>, StatusCode> {
    let name = body.name.trim();
    let slug = slugify(body.slug.as_deref().unwrap_or(name));
    if name.is_empty() || slug.is_empty() {
        warn!("trip name or slug empty");
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.trips.find_by_slug(q.user_id, &slug).await {
        Ok(Some(_)) => {
            warn!(%slug, "slug already used by this user");
            return Err(StatusCode::CONFLICT);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, %slug, "trip lookup failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let trip = state
        .trips
        .create(q.user_id, name, &slug)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(%slug, "slug taken by a concurrent insert");
                return StatusCode::CONFLICT;
            }
            error!(error = %e, %slug, "create trip failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!(trip_id = %trip.id, slug = %trip.slug, "trip created");
    Ok(Json(trip))
}

#[instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Trip>>, StatusCode> {
    let trips = state.trips.list_by_user(q.user_id).await.map_err(|e| {
        error!(error = %e, "list trips failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(trips))
}
