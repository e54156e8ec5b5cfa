//! expensectl-server: HTTP server for expense records
//!
//! Exposes create/list/get/update of expenses over JSON, backed by a
//! single PostgreSQL table and guarded by HTTP basic auth.

pub mod db;
pub mod http;
pub mod models;

pub use db::{connect, init_schema, DbError, ExpenseStore, PgExpenseStore, PoolSettings};
pub use http::{build_router, run_server, ApiError, AppState, Credentials, ServerConfig};
pub use models::{Expense, ExpenseInput};
