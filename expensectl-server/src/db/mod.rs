//! Database layer - connection pool, schema and the expense store
//!
//! # Design Principles
//!
//! - One pool for the whole process, handed to the store at startup
//! - One parameterized statement per operation, no transactions
//! - "Statement failed" and "row didn't decode" are separate errors

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{connect, PoolSettings};
pub use repos::*;
pub use schema::init_schema;
