//! Expense repository
//!
//! Each operation is a single parameterized statement:
//! - create: INSERT ... RETURNING id
//! - list: SELECT without ORDER BY (storage order)
//! - get: SELECT by id, missing row is `NotFound`
//! - update: full overwrite, zero rows affected is `NotFound`

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::models::{Expense, ExpenseInput};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The statement itself failed (connection, syntax, bad parameter)
    #[error("{0}")]
    Query(sqlx::Error),

    /// A returned row could not be decoded into an `Expense`
    #[error("{0}")]
    Decode(sqlx::Error),

    #[error("expense {id} not found")]
    NotFound { id: i32 },
}

/// Storage operations for expenses.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert a new expense, returning it with its generated id.
    async fn create(&self, input: ExpenseInput) -> Result<Expense, DbError>;

    /// All expenses, in whatever order the store yields them.
    async fn list(&self) -> Result<Vec<Expense>, DbError>;

    async fn get(&self, id: i32) -> Result<Expense, DbError>;

    /// Overwrite every field of an existing expense.
    async fn update(&self, id: i32, input: ExpenseInput) -> Result<Expense, DbError>;
}

const INSERT_EXPENSE: &str = r#"
INSERT INTO expenses (title, amount, note, tags)
VALUES ($1, $2, $3, $4)
RETURNING id
"#;

const SELECT_ALL: &str = "SELECT id, title, amount, note, tags FROM expenses";

const SELECT_BY_ID: &str = "SELECT id, title, amount, note, tags FROM expenses WHERE id = $1";

const UPDATE_EXPENSE: &str =
    "UPDATE expenses SET title = $1, amount = $2, note = $3, tags = $4 WHERE id = $5";

/// PostgreSQL-backed expense store
#[derive(Clone)]
pub struct PgExpenseStore {
    pool: PgPool,
}

impl PgExpenseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode(row: &PgRow) -> Result<Expense, DbError> {
    Expense::from_row(row).map_err(DbError::Decode)
}

#[async_trait]
impl ExpenseStore for PgExpenseStore {
    async fn create(&self, input: ExpenseInput) -> Result<Expense, DbError> {
        let id: i32 = sqlx::query_scalar(INSERT_EXPENSE)
            .bind(&input.title)
            .bind(input.amount)
            .bind(&input.note)
            .bind(&input.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::Query)?;

        tracing::debug!(id, "Created expense");
        Ok(input.with_id(id))
    }

    async fn list(&self) -> Result<Vec<Expense>, DbError> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::Query)?;

        rows.iter().map(decode).collect()
    }

    async fn get(&self, id: i32) -> Result<Expense, DbError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::Query)?
            .ok_or(DbError::NotFound { id })?;

        decode(&row)
    }

    async fn update(&self, id: i32, input: ExpenseInput) -> Result<Expense, DbError> {
        let result = sqlx::query(UPDATE_EXPENSE)
            .bind(&input.title)
            .bind(input.amount)
            .bind(&input.note)
            .bind(&input.tags)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::Query)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id });
        }

        tracing::debug!(id, "Updated expense");
        Ok(input.with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, init_schema, PoolSettings};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p expensectl-server -- --ignored

    async fn store() -> PgExpenseStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = connect(&url, &PoolSettings::default())
            .await
            .expect("pool creation failed");
        init_schema(&pool).await.expect("schema init failed");
        PgExpenseStore::new(pool)
    }

    fn input(title: &str, amount: f64, tags: &[&str]) -> ExpenseInput {
        ExpenseInput {
            title: title.into(),
            amount,
            note: format!("note for {title}"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let store = store().await;

        let created = store
            .create(input("strawberry smoothie", 79.45, &["a", "b", "c"]))
            .await
            .unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.tags, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_assigns_distinct_ids() {
        let store = store().await;

        let first = store.create(input("one", 1.0, &[])).await.unwrap();
        let second = store.create(input("two", 2.0, &[])).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_contains_created_rows() {
        let store = store().await;

        let r1 = store.create(input("r1", 1.5, &["x"])).await.unwrap();
        let r2 = store.create(input("r2", 2.5, &["y", "z"])).await.unwrap();
        let all = store.list().await.unwrap();

        assert!(all.contains(&r1));
        assert!(all.contains(&r2));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_overwrites_every_field() {
        let store = store().await;

        let created = store
            .create(input("strawberry smoothie", 79.45, &["food", "beverage"]))
            .await
            .unwrap();
        let replacement = ExpenseInput {
            title: "chocolate milkshake".into(),
            amount: 69.45,
            note: "price 69.45".into(),
            tags: vec!["food".into(), "beverage".into(), "dessert".into()],
        };

        store.update(created.id, replacement.clone()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched, replacement.with_id(created.id));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_rows_are_not_found() {
        let store = store().await;

        assert!(matches!(
            store.get(i32::MAX).await,
            Err(DbError::NotFound { id: i32::MAX })
        ));
        assert!(matches!(
            store.update(i32::MAX, ExpenseInput::default()).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_tags_column_is_a_decode_error() {
        let store = store().await;
        // Built in the query so the shared table never holds a NULL row.
        let row = sqlx::query(
            "SELECT 1 AS id, 'legacy'::text AS title, 1.0::float AS amount, \
             'n'::text AS note, NULL::text[] AS tags",
        )
        .fetch_one(&store.pool)
        .await
        .unwrap();

        let err = decode(&row).unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
        assert!(err.to_string().contains("tags"), "{err}");
    }
}
