//! Schema setup for the expenses table

use sqlx::PgPool;

const CREATE_EXPENSES: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id SERIAL PRIMARY KEY,
    title TEXT,
    amount FLOAT,
    note TEXT,
    tags TEXT[]
)
"#;

/// Ensure the `expenses` table exists. Safe to run on every startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring expenses table exists");
    sqlx::query(CREATE_EXPENSES).execute(pool).await?;
    Ok(())
}
