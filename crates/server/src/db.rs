use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::config::env_parse;
use crate::precedent_index::PrecedentIndex;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub precedents: Arc<PrecedentIndex>,
}

/// Pool created lazily: no connections are opened until the first query,
/// so each `#[tokio::test]` runtime can build its own.
static POOL: OnceCell<Pool<Postgres>> = OnceCell::const_new();

/// Create a connection pool from `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
pub fn create_pool() -> Result<Pool<Postgres>, AppError> {
    // Load .env if present; production sets variables directly.
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::internal("DATABASE_URL must be set"))?;
    let max_connections: u32 = env_parse("DATABASE_MAX_CONNECTIONS", 10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(|e| AppError::database(format!("Failed to create database pool: {e}")))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run database migrations: {e}")))
}

/// Process-wide pool used by server functions. Migrations run once, on
/// first use.
pub async fn get_db() -> Result<&'static Pool<Postgres>, AppError> {
    POOL.get_or_try_init(|| async {
        let pool = create_pool()?;
        run_migrations(&pool).await?;
        tracing::info!("database pool ready");
        Ok(pool)
    })
    .await
}
