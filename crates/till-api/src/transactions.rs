//! Handlers for the `/transactions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/transactions` | Filtered, sorted, paginated page envelope |
//! | `GET`  | `/transactions/filter-options` | Distinct facet values |
//!
//! Multi-valued query parameters (`customerRegion`, `gender`,
//! `productCategory`, `tags`, `paymentMethod`) arrive as comma-joined
//! strings and are split here, before the filter reaches the builder.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use till_core::{
  query::{FacetOptions, Page, SortField, SortOrder, TransactionFilter},
  store::TransactionStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub page:             Option<u32>,
  /// Page size; the UI calls this `limit`.
  pub limit:            Option<u32>,
  pub search:           Option<String>,
  /// Comma-joined, e.g. `North,South`.
  pub customer_region:  Option<String>,
  pub gender:           Option<String>,
  pub age_min:          Option<i64>,
  pub age_max:          Option<i64>,
  pub product_category: Option<String>,
  pub tags:             Option<String>,
  pub payment_method:   Option<String>,
  pub date_start:       Option<String>,
  pub date_end:         Option<String>,
  pub sort_by:          Option<String>,
  pub sort_order:       Option<String>,
}

/// Split a comma-joined parameter into trimmed, non-empty values.
fn split_multi(param: Option<String>) -> Vec<String> {
  param
    .map(|s| {
      s.split(',')
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
    })
    .unwrap_or_default()
}

impl ListParams {
  fn into_filter(self) -> (u32, u32, TransactionFilter, SortField, SortOrder) {
    let page = self.page.unwrap_or(1).max(1);
    let page_size = self.limit.unwrap_or(10).max(1);
    let sort_by = SortField::from_param(self.sort_by.as_deref().unwrap_or("date"));
    let sort_order = SortOrder::from_param(self.sort_order.as_deref());

    let filter = TransactionFilter {
      search:           self.search.filter(|s| !s.is_empty()),
      customer_region:  split_multi(self.customer_region),
      gender:           split_multi(self.gender),
      age_min:          self.age_min,
      age_max:          self.age_max,
      product_category: split_multi(self.product_category),
      tags:             split_multi(self.tags),
      payment_method:   split_multi(self.payment_method),
      date_start:       self.date_start.filter(|s| !s.is_empty()),
      date_end:         self.date_end.filter(|s| !s.is_empty()),
    };

    (page, page_size, filter, sort_by, sort_order)
  }
}

/// `GET /transactions?page&limit&search&customerRegion&…&sortBy&sortOrder`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page>, ApiError>
where
  S: TransactionStore,
{
  let (page, page_size, filter, sort_by, sort_order) = params.into_filter();

  let result = store
    .query_transactions(page, page_size, filter, sort_by, sort_order)
    .await
    .map_err(|e| ApiError::query("query_transactions", e))?;

  Ok(Json(result))
}

/// `GET /transactions/filter-options`
pub async fn filter_options<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<FacetOptions>, ApiError>
where
  S: TransactionStore,
{
  let options = store
    .filter_options()
    .await
    .map_err(|e| ApiError::query("filter_options", e))?;

  Ok(Json(options))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn split_multi_trims_and_drops_empties() {
    assert_eq!(
      split_multi(Some("North, South ,,West".to_owned())),
      vec!["North", "South", "West"]
    );
    assert_eq!(split_multi(Some(String::new())), Vec::<String>::new());
    assert_eq!(split_multi(None), Vec::<String>::new());
  }

  #[test]
  fn defaults_match_the_ui_contract() {
    let (page, page_size, filter, sort_by, sort_order) =
      ListParams::default().into_filter();
    assert_eq!(page, 1);
    assert_eq!(page_size, 10);
    assert!(filter.is_empty());
    assert_eq!(sort_by, SortField::Date);
    assert_eq!(sort_order, SortOrder::Desc);
  }

  #[test]
  fn page_and_limit_are_clamped_to_one() {
    let params = ListParams { page: Some(0), limit: Some(0), ..Default::default() };
    let (page, page_size, ..) = params.into_filter();
    assert_eq!(page, 1);
    assert_eq!(page_size, 1);
  }

  #[test]
  fn unknown_sort_by_falls_back_to_date() {
    let params = ListParams {
      sort_by: Some("totalAmount".to_owned()),
      sort_order: Some("asc".to_owned()),
      ..Default::default()
    };
    let (.., sort_by, sort_order) = params.into_filter();
    assert_eq!(sort_by, SortField::Date);
    assert_eq!(sort_order, SortOrder::Asc);
  }
}
