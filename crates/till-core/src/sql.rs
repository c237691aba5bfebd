//! The filter-to-SQL predicate builder.
//!
//! Translates a [`TransactionFilter`] into a WHERE fragment plus positional
//! parameter list, abstracted over the backend's placeholder syntax: SQLite
//! binds anonymous `?` slots, PostgreSQL numbered `$n` slots. The predicate
//! is built once and reused verbatim by both the count query and the page
//! query, so the two can never disagree about what matches.

use crate::query::{SortField, SortOrder, TransactionFilter};

// ─── Placeholders ─────────────────────────────────────────────────────────────

/// Placeholder syntax of the target backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholders {
  /// Anonymous `?` slots (SQLite).
  Anonymous,
  /// Numbered `$n` slots, 1-based (PostgreSQL).
  Numbered,
}

impl Placeholders {
  /// Render the placeholder for the `n`-th parameter of the statement
  /// (1-based). Backends appending LIMIT/OFFSET slots continue the same
  /// numbering past the filter parameters.
  pub fn nth(self, n: usize) -> String {
    match self {
      Self::Anonymous => "?".to_owned(),
      Self::Numbered => format!("${n}"),
    }
  }
}

// ─── Parameters ───────────────────────────────────────────────────────────────

/// A positional query parameter. Backends convert these into their native
/// bind values.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
  Text(String),
  Int(i64),
}

// ─── Output ───────────────────────────────────────────────────────────────────

/// A rendered filter predicate: either an empty string or `WHERE …`, plus
/// the parameters bound by its slots in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSql {
  pub where_clause: String,
  pub params:       Vec<Param>,
}

// ─── Builder ──────────────────────────────────────────────────────────────────

struct PredicateBuilder {
  style:      Placeholders,
  conditions: Vec<String>,
  params:     Vec<Param>,
}

impl PredicateBuilder {
  fn new(style: Placeholders) -> Self {
    Self { style, conditions: Vec::new(), params: Vec::new() }
  }

  /// Bind `value` and return the placeholder that refers to it.
  fn bind(&mut self, value: Param) -> String {
    self.params.push(value);
    self.style.nth(self.params.len())
  }

  /// `column IN (…)` over a non-empty value set.
  fn push_in(&mut self, column: &str, values: &[String]) {
    let slots: Vec<String> = values
      .iter()
      .map(|v| self.bind(Param::Text(v.clone())))
      .collect();
    self.conditions.push(format!("{column} IN ({})", slots.join(",")));
  }

  fn finish(self) -> FilterSql {
    let where_clause = if self.conditions.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.conditions.join(" AND "))
    };
    FilterSql { where_clause, params: self.params }
  }
}

/// Build the WHERE predicate for `filter`.
///
/// Present dimensions compose with AND in a fixed order; within the tags
/// dimension the requested tags compose with OR (substring semantics).
pub fn build_filter(filter: &TransactionFilter, style: Placeholders) -> FilterSql {
  let mut b = PredicateBuilder::new(style);

  if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
    // The pattern is lowercased once and bound twice; `phone_number` is
    // matched against the same pattern, digits being case-insensitive anyway.
    let pattern = format!("%{}%", search.to_lowercase());
    let p1 = b.bind(Param::Text(pattern.clone()));
    let p2 = b.bind(Param::Text(pattern));
    b.conditions.push(format!(
      "(LOWER(customer_name) LIKE {p1} OR phone_number LIKE {p2})"
    ));
  }

  if !filter.customer_region.is_empty() {
    b.push_in("customer_region", &filter.customer_region);
  }

  if !filter.gender.is_empty() {
    b.push_in("gender", &filter.gender);
  }

  if let Some(min) = filter.age_min {
    let p = b.bind(Param::Int(min));
    b.conditions.push(format!("age >= {p}"));
  }
  if let Some(max) = filter.age_max {
    let p = b.bind(Param::Int(max));
    b.conditions.push(format!("age <= {p}"));
  }

  if !filter.product_category.is_empty() {
    b.push_in("product_category", &filter.product_category);
  }

  if !filter.tags.is_empty() {
    let alternatives: Vec<String> = filter
      .tags
      .iter()
      .map(|tag| {
        let p = b.bind(Param::Text(format!("%{tag}%")));
        format!("tags LIKE {p}")
      })
      .collect();
    b.conditions.push(format!("({})", alternatives.join(" OR ")));
  }

  if !filter.payment_method.is_empty() {
    b.push_in("payment_method", &filter.payment_method);
  }

  if let Some(start) = filter.date_start.as_deref().filter(|s| !s.is_empty()) {
    let p = b.bind(Param::Text(start.to_owned()));
    b.conditions.push(format!("date >= {p}"));
  }
  if let Some(end) = filter.date_end.as_deref().filter(|s| !s.is_empty()) {
    let p = b.bind(Param::Text(end.to_owned()));
    b.conditions.push(format!("date <= {p}"));
  }

  b.finish()
}

/// Render the ORDER BY fragment for a sort specification.
pub fn order_by(sort_by: SortField, sort_order: SortOrder) -> String {
  format!("ORDER BY {} {}", sort_by.column(), sort_order.keyword())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn text(s: &str) -> Param {
    Param::Text(s.to_owned())
  }

  #[test]
  fn empty_filter_builds_no_predicate() {
    let sql = build_filter(&TransactionFilter::default(), Placeholders::Anonymous);
    assert_eq!(sql.where_clause, "");
    assert!(sql.params.is_empty());
  }

  #[test]
  fn search_binds_lowercased_pattern_twice() {
    let filter = TransactionFilter {
      search: Some("John".to_owned()),
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Anonymous);
    assert_eq!(
      sql.where_clause,
      "WHERE (LOWER(customer_name) LIKE ? OR phone_number LIKE ?)"
    );
    assert_eq!(sql.params, vec![text("%john%"), text("%john%")]);
  }

  #[test]
  fn in_sets_render_one_slot_per_value() {
    let filter = TransactionFilter {
      customer_region: vec!["North".to_owned(), "South".to_owned()],
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Anonymous);
    assert_eq!(sql.where_clause, "WHERE customer_region IN (?,?)");
    assert_eq!(sql.params, vec![text("North"), text("South")]);
  }

  #[test]
  fn numbered_placeholders_count_across_dimensions() {
    let filter = TransactionFilter {
      search: Some("doe".to_owned()),
      gender: vec!["F".to_owned(), "M".to_owned()],
      age_min: Some(18),
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Numbered);
    assert_eq!(
      sql.where_clause,
      "WHERE (LOWER(customer_name) LIKE $1 OR phone_number LIKE $2) \
       AND gender IN ($3,$4) AND age >= $5"
    );
    assert_eq!(sql.params.len(), 5);
    assert_eq!(sql.params[4], Param::Int(18));
  }

  #[test]
  fn tags_compose_with_or_inside_the_dimension() {
    let filter = TransactionFilter {
      tags: vec!["red".to_owned(), "blue".to_owned()],
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Anonymous);
    assert_eq!(sql.where_clause, "WHERE (tags LIKE ? OR tags LIKE ?)");
    assert_eq!(sql.params, vec![text("%red%"), text("%blue%")]);
  }

  #[test]
  fn dimensions_compose_with_and() {
    let filter = TransactionFilter {
      customer_region: vec!["North".to_owned()],
      payment_method: vec!["Cash".to_owned()],
      date_start: Some("01-01-2023".to_owned()),
      date_end: Some("31-12-2023".to_owned()),
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Numbered);
    assert_eq!(
      sql.where_clause,
      "WHERE customer_region IN ($1) AND payment_method IN ($2) \
       AND date >= $3 AND date <= $4"
    );
  }

  #[test]
  fn blank_search_and_dates_are_ignored() {
    let filter = TransactionFilter {
      search: Some(String::new()),
      date_start: Some(String::new()),
      ..Default::default()
    };
    let sql = build_filter(&filter, Placeholders::Anonymous);
    assert_eq!(sql.where_clause, "");
  }

  #[test]
  fn order_by_renders_column_and_direction() {
    assert_eq!(order_by(SortField::Date, SortOrder::Desc), "ORDER BY date DESC");
    assert_eq!(
      order_by(SortField::CustomerName, SortOrder::Asc),
      "ORDER BY customer_name ASC"
    );
    assert_eq!(
      order_by(SortField::Quantity, SortOrder::Desc),
      "ORDER BY quantity DESC"
    );
  }
}
