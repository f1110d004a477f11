use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::insert_error;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait TripRepo: Send + Sync {
    /// Slugs are unique per owner, so this yields at most one trip.
    async fn find_by_slug(&self, user_id: Uuid, slug: &str) -> anyhow::Result<Option<Trip>>;
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Trip>>;
    async fn create(&self, user_id: Uuid, name: &str, slug: &str) -> anyhow::Result<Trip>;
}

#[derive(Clone)]
pub struct PgTripRepo {
    db: PgPool,
}

impl PgTripRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TripRepo for PgTripRepo {
    async fn find_by_slug(&self, user_id: Uuid, slug: &str) -> anyhow::Result<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT id, user_id, name, slug, created_at
              FROM trips
             WHERE slug = $1 AND user_id = $2
            "#,
        )
        .bind(slug)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find trip by slug")?;
        Ok(trip)
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Trip>> {
        let rows = sqlx::query_as::<_, Trip>(
            r#"
            SELECT id, user_id, name, slug, created_at
              FROM trips
             WHERE user_id = $1
             ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list trips by user")?;
        Ok(rows)
    }

    async fn create(&self, user_id: Uuid, name: &str, slug: &str) -> anyhow::Result<Trip> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, user_id, name, slug)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, slug, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(slug)
        .fetch_one(&self.db)
        .await
        .map_err(|e| insert_error(e, "insert trip"))?;
        Ok(trip)
    }
}
