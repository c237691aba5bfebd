//! Integration tests for `SqliteStore` against an in-memory database.

use till_core::{
  query::{SortField, SortOrder, TransactionFilter},
  store::TransactionStore,
  transaction::Transaction,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn txn(name: &str) -> Transaction {
  Transaction {
    customer_name: Some(name.to_owned()),
    ..Default::default()
  }
}

/// Six rows covering every filter dimension.
async fn seeded_store() -> SqliteStore {
  let s = store().await;
  let rows = vec![
    Transaction {
      customer_name: Some("John Doe".into()),
      phone_number: Some("9876543210".into()),
      gender: Some("M".into()),
      age: 34,
      customer_region: Some("North".into()),
      product_category: Some("Electronics".into()),
      tags: Some("red,blue".into()),
      payment_method: Some("Cash".into()),
      date: Some("05-01-2023".into()),
      quantity: 2,
      ..Default::default()
    },
    Transaction {
      customer_name: Some("Jane Smith".into()),
      phone_number: Some("9123456780".into()),
      gender: Some("F".into()),
      age: 28,
      customer_region: Some("South".into()),
      product_category: Some("Clothing".into()),
      tags: Some("blue, green".into()),
      payment_method: Some("Card".into()),
      date: Some("10-02-2023".into()),
      quantity: 1,
      ..Default::default()
    },
    Transaction {
      customer_name: Some("Johnny Bravo".into()),
      gender: Some("M".into()),
      age: 41,
      customer_region: Some("North".into()),
      product_category: Some("Electronics".into()),
      tags: Some("red".into()),
      payment_method: Some("UPI".into()),
      date: Some("15-03-2023".into()),
      quantity: 5,
      ..Default::default()
    },
    Transaction {
      customer_name: Some("Asha Patel".into()),
      gender: Some("F".into()),
      age: 23,
      customer_region: Some("East".into()),
      product_category: Some("Grocery".into()),
      payment_method: Some("Cash".into()),
      date: Some("20-04-2023".into()),
      quantity: 3,
      ..Default::default()
    },
    Transaction {
      customer_name: Some("Wei Chen".into()),
      gender: Some("F".into()),
      age: 56,
      customer_region: Some("North".into()),
      product_category: Some("Clothing".into()),
      tags: Some("gift wrap".into()),
      payment_method: Some("Card".into()),
      date: Some("25-05-2023".into()),
      quantity: 4,
      ..Default::default()
    },
    Transaction {
      customer_name: Some("Ravi Kumar".into()),
      gender: Some("M".into()),
      age: 19,
      customer_region: Some("West".into()),
      product_category: Some("Grocery".into()),
      tags: Some("red,green".into()),
      payment_method: Some("UPI".into()),
      date: Some("28-06-2023".into()),
      quantity: 6,
      ..Default::default()
    },
  ];
  s.insert_batch(rows).await.unwrap();
  s
}

async fn query(
  s: &SqliteStore,
  page: u32,
  page_size: u32,
  filter: TransactionFilter,
) -> till_core::query::Page {
  s.query_transactions(page, page_size, filter, SortField::Date, SortOrder::Asc)
    .await
    .unwrap()
}

fn names(page: &till_core::query::Page) -> Vec<&str> {
  page
    .transactions
    .iter()
    .map(|t| t.customer_name.as_deref().unwrap())
    .collect()
}

// ─── Import path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_batch_and_count() {
  let s = store().await;
  assert_eq!(s.record_count().await.unwrap(), 0);

  s.insert_batch(vec![txn("a"), txn("b"), txn("c")]).await.unwrap();
  assert_eq!(s.record_count().await.unwrap(), 3);
}

#[tokio::test]
async fn clear_empties_the_table() {
  let s = seeded_store().await;
  assert_eq!(s.record_count().await.unwrap(), 6);

  s.clear().await.unwrap();
  assert_eq!(s.record_count().await.unwrap(), 0);
}

// ─── Pagination ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn page_sizes_full_except_last() {
  let s = seeded_store().await;

  let first = query(&s, 1, 4, TransactionFilter::default()).await;
  assert_eq!(first.transactions.len(), 4);
  assert_eq!(first.total_records, 6);
  assert_eq!(first.total_pages, 2);
  assert_eq!(first.current_page, 1);
  assert_eq!(first.page_size, 4);

  let last = query(&s, 2, 4, TransactionFilter::default()).await;
  assert_eq!(last.transactions.len(), 2);
  assert_eq!(last.total_records, 6);
}

#[tokio::test]
async fn page_beyond_range_is_empty_not_an_error() {
  let s = seeded_store().await;

  let page = query(&s, 99, 4, TransactionFilter::default()).await;
  assert!(page.transactions.is_empty());
  assert_eq!(page.total_records, 6);
  assert_eq!(page.total_pages, 2);
  assert_eq!(page.current_page, 99);
}

#[tokio::test]
async fn zero_matches_envelope() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    customer_region: vec!["Nowhere".into()],
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert!(page.transactions.is_empty());
  assert_eq!(page.current_page, 1);
  assert_eq!(page.total_pages, 0);
  assert_eq!(page.total_records, 0);
  assert_eq!(page.page_size, 10);
}

#[tokio::test]
async fn count_agrees_with_paged_rows() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    customer_region: vec!["North".into()],
    ..Default::default()
  };

  let first = query(&s, 1, 2, filter.clone()).await;
  let second = query(&s, 2, 2, filter).await;

  assert_eq!(first.total_records, 3);
  assert_eq!(second.total_records, 3);
  assert_eq!(first.transactions.len() + second.transactions.len(), 3);
}

// ─── Filtering ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn filters_intersect_not_union() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    customer_region: vec!["North".into()],
    gender: vec!["F".into()],
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert_eq!(names(&page), vec!["Wei Chen"]);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    search: Some("john".into()),
    ..Default::default()
  };

  // "Johnny Bravo" is a false positive under substring semantics — expected.
  let page = query(&s, 1, 10, filter).await;
  assert_eq!(names(&page), vec!["John Doe", "Johnny Bravo"]);
}

#[tokio::test]
async fn search_matches_phone_number() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    search: Some("98765".into()),
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert_eq!(names(&page), vec!["John Doe"]);
}

#[tokio::test]
async fn age_bounds_are_inclusive() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    age_min: Some(28),
    age_max: Some(41),
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert_eq!(names(&page), vec!["John Doe", "Jane Smith", "Johnny Bravo"]);
}

#[tokio::test]
async fn tags_match_any_requested_tag() {
  let s = seeded_store().await;

  let red = TransactionFilter { tags: vec!["red".into()], ..Default::default() };
  let page = query(&s, 1, 10, red).await;
  assert_eq!(names(&page), vec!["John Doe", "Johnny Bravo", "Ravi Kumar"]);

  let either = TransactionFilter {
    tags: vec!["green".into(), "gift".into()],
    ..Default::default()
  };
  let page = query(&s, 1, 10, either).await;
  assert_eq!(names(&page), vec!["Jane Smith", "Wei Chen", "Ravi Kumar"]);
}

#[tokio::test]
async fn date_range_compares_stored_text() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    date_start: Some("10-02-2023".into()),
    date_end: Some("25-05-2023".into()),
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert_eq!(page.total_records, 4);
}

#[tokio::test]
async fn payment_method_set_membership() {
  let s = seeded_store().await;
  let filter = TransactionFilter {
    payment_method: vec!["Cash".into(), "UPI".into()],
    ..Default::default()
  };

  let page = query(&s, 1, 10, filter).await;
  assert_eq!(page.total_records, 4);
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn customer_name_asc_and_desc_are_reverses() {
  let s = seeded_store().await;

  let asc = s
    .query_transactions(
      1,
      10,
      TransactionFilter::default(),
      SortField::CustomerName,
      SortOrder::Asc,
    )
    .await
    .unwrap();
  let desc = s
    .query_transactions(
      1,
      10,
      TransactionFilter::default(),
      SortField::CustomerName,
      SortOrder::Desc,
    )
    .await
    .unwrap();

  let mut reversed = names(&desc);
  reversed.reverse();
  assert_eq!(names(&asc), reversed);
  assert_eq!(names(&asc)[0], "Asha Patel");
}

#[tokio::test]
async fn sort_by_quantity() {
  let s = seeded_store().await;
  let page = s
    .query_transactions(
      1,
      10,
      TransactionFilter::default(),
      SortField::Quantity,
      SortOrder::Desc,
    )
    .await
    .unwrap();

  let quantities: Vec<i64> = page.transactions.iter().map(|t| t.quantity).collect();
  assert_eq!(quantities, vec![6, 5, 4, 3, 2, 1]);
}

// ─── Facet options ───────────────────────────────────────────────────────────

#[tokio::test]
async fn facet_options_are_distinct_and_sorted() {
  let s = seeded_store().await;
  let options = s.filter_options().await.unwrap();

  assert_eq!(options.regions, vec!["East", "North", "South", "West"]);
  assert_eq!(options.genders, vec!["F", "M"]);
  assert_eq!(options.categories, vec!["Clothing", "Electronics", "Grocery"]);
  assert_eq!(options.payment_methods, vec!["Card", "Cash", "UPI"]);
  assert_eq!(options.tags, vec!["blue", "gift wrap", "green", "red"]);
}

#[tokio::test]
async fn tag_vocabulary_is_split_trimmed_deduplicated() {
  let s = store().await;
  let rows = vec![
    Transaction { tags: Some("red,blue".into()), ..Default::default() },
    Transaction { tags: Some("blue, green".into()), ..Default::default() },
    Transaction { tags: Some("red".into()), ..Default::default() },
  ];
  s.insert_batch(rows).await.unwrap();

  let options = s.filter_options().await.unwrap();
  assert_eq!(options.tags, vec!["blue", "green", "red"]);
}

#[tokio::test]
async fn facet_options_on_empty_store() {
  let s = store().await;
  let options = s.filter_options().await.unwrap();
  assert!(options.regions.is_empty());
  assert!(options.tags.is_empty());
}
