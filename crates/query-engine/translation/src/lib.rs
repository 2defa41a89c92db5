//! Translate application lookups into parameterized SQL queries.

pub mod translation;
