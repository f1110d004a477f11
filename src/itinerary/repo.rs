use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Itinerary, ItineraryRow, NewItinerary};

#[async_trait]
pub trait ItineraryRepo: Send + Sync {
    async fn insert(&self, new: NewItinerary) -> anyhow::Result<Itinerary>;
    async fn list_by_trip(&self, user_id: Uuid, trip_id: Uuid) -> anyhow::Result<Vec<Itinerary>>;
}

#[derive(Clone)]
pub struct PgItineraryRepo {
    db: PgPool,
}

impl PgItineraryRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItineraryRepo for PgItineraryRepo {
    async fn insert(&self, new: NewItinerary) -> anyhow::Result<Itinerary> {
        let row = sqlx::query_as::<_, ItineraryRow>(
            r#"
            INSERT INTO itineraries
                (id, user_id, trip_id, name, lng, lat, address, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, trip_id, name, lng, lat, address, start_date, end_date
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.trip_id) // NULL when no trip matched the slug
        .bind(&new.name)
        .bind(new.location.lng())
        .bind(new.location.lat())
        .bind(&new.location.address)
        .bind(new.start_date)
        .bind(new.end_date)
        .fetch_one(&self.db)
        .await
        .context("insert itinerary")?;
        Ok(row.into())
    }

    async fn list_by_trip(&self, user_id: Uuid, trip_id: Uuid) -> anyhow::Result<Vec<Itinerary>> {
        let rows = sqlx::query_as::<_, ItineraryRow>(
            r#"
            SELECT id, user_id, trip_id, name, lng, lat, address, start_date, end_date
              FROM itineraries
             WHERE user_id = $1 AND trip_id = $2
             ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(trip_id)
        .fetch_all(&self.db)
        .await
        .context("list itineraries by trip")?;
        Ok(rows.into_iter().map(Itinerary::from).collect())
    }
}
