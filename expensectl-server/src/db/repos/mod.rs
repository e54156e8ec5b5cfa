//! Repository implementations for database access
//!
//! The HTTP layer only sees the `ExpenseStore` trait, so handlers can be
//! driven against an in-memory store in tests.

pub mod expenses;
#[cfg(test)]
pub mod memory;

pub use expenses::{DbError, ExpenseStore, PgExpenseStore};
