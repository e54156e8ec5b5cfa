//! Expense record and request body

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Expense row as stored in the `expenses` table.
///
/// Field order here is the JSON field order on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: f64,
    pub note: String,
    pub tags: Vec<String>,
}

/// Client-supplied expense fields for create and update.
///
/// There is no `id` field: an `id` in the body is ignored and the server
/// decides it (generated on create, taken from the path on update).
/// Missing fields and explicit `null`s fall back to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpenseInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ExpenseInput {
    /// Attach an id, producing the full record.
    pub fn with_id(self, id: i32) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            note: self.note,
            tags: self.tags,
        }
    }
}
