//! Core types and trait definitions for the Till transaction store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//! Everything here is pure: the SQL predicate builder produces strings and
//! parameter lists, never touches a connection.

pub mod query;
pub mod sql;
pub mod store;
pub mod transaction;
