//! Build SQL statements from a small AST and render them as parameterized query strings.

pub mod sql;
