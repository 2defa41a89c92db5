//! Translate a lookup request to a SQL query to be run against the database.

pub mod query;
