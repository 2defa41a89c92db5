//! Query execution against a PostgreSQL database.
//!
//! Statements run inside a transaction opened by [`transaction::run`], which hands the
//! caller an [`context::ExecutionContext`] bound to a single pooled connection.

pub mod connection;
pub mod context;
pub mod error;
pub mod postgres;
pub mod transaction;

pub use connection::{Connection, Directive, Pool, Record};
pub use context::ExecutionContext;
pub use error::Error;
