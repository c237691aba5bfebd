//! PostgreSQL backend for the Till transaction store.
//!
//! Same [`TransactionStore`](till_core::store::TransactionStore) contract as
//! the SQLite backend, binding numbered `$n` placeholders rendered by the
//! shared predicate builder.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::PostgresStore;
