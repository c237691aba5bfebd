//! Query specifications and result envelopes.
//!
//! [`TransactionFilter`] mirrors the filter bar of the browsing UI: every
//! dimension is optional, present dimensions compose with AND. The sort and
//! pagination types carry the wire-level defaulting rules so both storage
//! backends behave identically.

use serde::Serialize;

use crate::transaction::Transaction;

// ─── Filter specification ─────────────────────────────────────────────────────

/// Optional constraints narrowing which transactions match a query.
///
/// An empty `Vec` or `None` means "no constraint on that dimension".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
  /// Case-insensitive substring match against customer name, or substring
  /// match against phone number.
  pub search:           Option<String>,
  /// Row's `customer_region` must be one of these.
  pub customer_region:  Vec<String>,
  pub gender:           Vec<String>,
  pub age_min:          Option<i64>,
  pub age_max:          Option<i64>,
  pub product_category: Vec<String>,
  /// Substring match against the comma-joined `tags` column; a row matches
  /// if it contains ANY of the requested tags. A requested tag that is a
  /// substring of another stored tag produces false positives — that is the
  /// contract, not a bug.
  pub tags:             Vec<String>,
  pub payment_method:   Vec<String>,
  /// Inclusive bounds compared against the stored `DD-MM-YYYY` text. The
  /// format is not lexicographically sortable, so range results reflect
  /// textual order, not calendar order.
  pub date_start:       Option<String>,
  pub date_end:         Option<String>,
}

impl TransactionFilter {
  /// `true` if no dimension constrains the result set.
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

// ─── Sort specification ───────────────────────────────────────────────────────

/// The sortable columns. Single key, no secondary tiebreak: tie order is
/// storage dependent and not guaranteed stable across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
  #[default]
  Date,
  Quantity,
  CustomerName,
}

impl SortField {
  /// Map a wire-level `sortBy` value; unrecognized values fall back to
  /// [`SortField::Date`].
  pub fn from_param(s: &str) -> Self {
    match s {
      "date" => Self::Date,
      "quantity" => Self::Quantity,
      "customerName" => Self::CustomerName,
      _ => Self::Date,
    }
  }

  /// The underlying column name.
  pub fn column(self) -> &'static str {
    match self {
      Self::Date => "date",
      Self::Quantity => "quantity",
      Self::CustomerName => "customer_name",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

impl SortOrder {
  /// Map a wire-level `sortOrder` value. Only the literal `"desc"` sorts
  /// descending; any other present value sorts ascending. An absent
  /// parameter defaults to descending.
  pub fn from_param(s: Option<&str>) -> Self {
    match s {
      None | Some("desc") => Self::Desc,
      Some(_) => Self::Asc,
    }
  }

  pub fn keyword(self) -> &'static str {
    match self {
      Self::Asc => "ASC",
      Self::Desc => "DESC",
    }
  }
}

// ─── Result envelopes ─────────────────────────────────────────────────────────

/// One page of matching transactions plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
  pub transactions:  Vec<Transaction>,
  pub current_page:  u32,
  pub total_pages:   u32,
  pub total_records: u64,
  pub page_size:     u32,
}

/// Distinct values per filterable dimension, for populating UI choice lists.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
  pub regions:         Vec<String>,
  pub genders:         Vec<String>,
  pub categories:      Vec<String>,
  pub tags:            Vec<String>,
  pub payment_methods: Vec<String>,
}

// ─── Pagination math ──────────────────────────────────────────────────────────

/// `ceil(total_records / page_size)`. Zero records means zero pages.
pub fn total_pages(total_records: u64, page_size: u32) -> u32 {
  total_records.div_ceil(page_size as u64) as u32
}

/// 1-based page number to row offset. No clamping against the total: a page
/// beyond range simply yields an empty result set.
pub fn page_offset(page: u32, page_size: u32) -> u64 {
  (page as u64 - 1) * page_size as u64
}

/// Derive the sorted, deduplicated tag vocabulary from every row's
/// comma-joined `tags` value. Entries are trimmed; empties are dropped.
pub fn tag_vocabulary<'a>(rows: impl IntoIterator<Item = &'a str>) -> Vec<String> {
  let mut set = std::collections::BTreeSet::new();
  for row in rows {
    for tag in row.split(',') {
      let tag = tag.trim();
      if !tag.is_empty() {
        set.insert(tag.to_owned());
      }
    }
  }
  set.into_iter().collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_field_falls_back_to_date() {
    assert_eq!(SortField::from_param("date"), SortField::Date);
    assert_eq!(SortField::from_param("quantity"), SortField::Quantity);
    assert_eq!(SortField::from_param("customerName"), SortField::CustomerName);
    assert_eq!(SortField::from_param("finalAmount"), SortField::Date);
    assert_eq!(SortField::from_param(""), SortField::Date);
  }

  #[test]
  fn sort_order_defaults_descending() {
    assert_eq!(SortOrder::from_param(None), SortOrder::Desc);
    assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
    assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
    // Anything that is not exactly "desc" sorts ascending.
    assert_eq!(SortOrder::from_param(Some("DESC")), SortOrder::Asc);
  }

  #[test]
  fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(25, 10), 3);
  }

  #[test]
  fn page_offset_is_one_based() {
    assert_eq!(page_offset(1, 10), 0);
    assert_eq!(page_offset(2, 10), 10);
    assert_eq!(page_offset(7, 25), 150);
  }

  #[test]
  fn tag_vocabulary_trims_dedupes_sorts() {
    let rows = ["red,blue", "blue, green", "red"];
    assert_eq!(tag_vocabulary(rows), vec!["blue", "green", "red"]);
  }

  #[test]
  fn tag_vocabulary_drops_empties() {
    let rows = ["a,,b", " , c"];
    assert_eq!(tag_vocabulary(rows), vec!["a", "b", "c"]);
  }
}
