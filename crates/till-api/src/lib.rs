//! JSON REST API for Till.
//!
//! Exposes an axum [`Router`] backed by any
//! [`till_core::store::TransactionStore`]. Transport concerns (bind address,
//! trace middleware, shutdown) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", till_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod health;
pub mod transactions;

use std::sync::Arc;

use axum::{Router, routing::get};
use till_core::store::TransactionStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TransactionStore + Send + Sync + 'static,
{
  Router::new()
    .route("/transactions", get(transactions::list::<S>))
    .route("/transactions/filter-options", get(transactions::filter_options::<S>))
    .route("/health", get(health::handler::<S>))
    .with_state(store)
}
