use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

/// Creates the shared PostgreSQL connection pool and applies pending
/// migrations. Every read/write operation in the app goes through this pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Collapses a failed list fetch into an empty list, logging the cause.
/// Used only by the public home aggregation, where a broken section must not
/// take the whole page down; every other caller handles the error itself.
pub fn or_empty<T>(result: Result<Vec<T>, sqlx::Error>, what: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to fetch {what}, rendering empty: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_empty_passes_rows_through() {
        let rows = or_empty(Ok(vec![1, 2, 3]), "numbers");
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_or_empty_swallows_fetch_errors() {
        let rows: Vec<i32> = or_empty(Err(sqlx::Error::PoolClosed), "numbers");
        assert!(rows.is_empty());
    }
}
