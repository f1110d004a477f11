use serde::Deserialize;
use uuid::Uuid;

/// `?userID=` scoping every trip and itinerary request.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}
