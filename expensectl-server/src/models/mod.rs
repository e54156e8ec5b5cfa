//! Domain models
//!
//! `Expense` is what gets stored and returned; `ExpenseInput` is what a
//! client is allowed to send.

pub mod expense;

pub use expense::{Expense, ExpenseInput};
