//! Schema bootstrap for the article table

use sqlx::PgPool;

/// Ensure the `article` table exists.
///
/// Title uniqueness is a storage constraint; the service relies on it to
/// reject concurrent duplicate inserts.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running article migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS article (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL UNIQUE,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Article migrations complete");
    Ok(())
}
