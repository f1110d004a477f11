use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::OffsetDateTime;

use crate::config::AppConfig;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

/// An insert lost against a UNIQUE constraint.
#[derive(Debug, thiserror::Error)]
#[error("unique constraint violated")]
pub struct UniqueViolation;

/// Turns a unique-key failure into [`UniqueViolation`]; everything else keeps
/// its context.
pub fn insert_error(e: sqlx::Error, what: &'static str) -> anyhow::Error {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => UniqueViolation.into(),
        e => anyhow::Error::new(e).context(what),
    }
}

pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.is::<UniqueViolation>()
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
