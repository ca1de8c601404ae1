use sqlx::{PgPool, postgres::PgPoolOptions};

/// # Errors
///
/// Fails when the database cannot be reached with `database_url`.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
