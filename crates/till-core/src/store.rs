//! The `TransactionStore` trait.
//!
//! Implemented by storage backends (`till-store-sqlite`,
//! `till-store-postgres`). Higher layers (`till-api`, `till-server`) depend
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  query::{FacetOptions, Page, SortField, SortOrder, TransactionFilter},
  transaction::Transaction,
};

/// Abstraction over a Till transaction store backend.
///
/// The query path is strictly read-only; rows enter the table only through
/// [`insert_batch`](TransactionStore::insert_batch), used by the bulk
/// importer. All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait TransactionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch one page of transactions under `filter`, sorted by
  /// `sort_by`/`sort_order`.
  ///
  /// `page` is 1-based and is not clamped against the total: a page beyond
  /// range yields an empty `transactions` list with the count metadata
  /// intact. The count query and the page query share one predicate, so
  /// `total_records` always agrees with the matching set being paged.
  fn query_transactions(
    &self,
    page: u32,
    page_size: u32,
    filter: TransactionFilter,
    sort_by: SortField,
    sort_order: SortOrder,
  ) -> impl Future<Output = Result<Page, Self::Error>> + Send + '_;

  /// Distinct value sets for every filterable dimension, over the entire
  /// unfiltered table. A full-table scan for the tag vocabulary by design;
  /// called once per UI session, not per keystroke.
  fn filter_options(
    &self,
  ) -> impl Future<Output = Result<FacetOptions, Self::Error>> + Send + '_;

  /// Total row count, unfiltered. Used by the health endpoint and the
  /// importer's double-import guard.
  fn record_count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Insert a batch of rows inside one transaction; a partial failure rolls
  /// the whole batch back.
  fn insert_batch(
    &self,
    rows: Vec<Transaction>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete every row. Only the importer's `--force` path calls this.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
