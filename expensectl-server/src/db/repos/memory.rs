//! In-memory store for exercising the HTTP layer without PostgreSQL

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::expenses::{DbError, ExpenseStore};
use crate::models::{Expense, ExpenseInput};

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, Expense>,
}

/// Mirrors the PostgreSQL store: SERIAL-style ids starting at 1,
/// full-overwrite updates, `NotFound` on missing ids.
#[derive(Default)]
pub struct MemoryExpenseStore {
    inner: RwLock<Inner>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn create(&self, input: ExpenseInput) -> Result<Expense, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let expense = input.with_id(inner.last_id);
        inner.rows.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn list(&self) -> Result<Vec<Expense>, DbError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Expense, DbError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound { id })
    }

    async fn update(&self, id: i32, input: ExpenseInput) -> Result<Expense, DbError> {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id).ok_or(DbError::NotFound { id })?;
        *row = input.with_id(id);
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = MemoryExpenseStore::new();
        let a = store.create(ExpenseInput::default()).await.unwrap();
        let b = store.create(ExpenseInput::default()).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let store = MemoryExpenseStore::new();
        let err = store.update(3, ExpenseInput::default()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { id: 3 }));
    }
}
