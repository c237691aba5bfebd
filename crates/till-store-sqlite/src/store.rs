//! [`SqliteStore`] — the SQLite implementation of [`TransactionStore`].

use std::path::Path;

use till_core::{
  query::{self, FacetOptions, Page, SortField, SortOrder, TransactionFilter},
  sql::{self, Param, Placeholders},
  store::TransactionStore,
  transaction::Transaction,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Till transaction store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and all
/// access is serialised through its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Binding and decoding ────────────────────────────────────────────────────

/// Convert a builder [`Param`] into a rusqlite bind value.
fn bind_value(p: &Param) -> rusqlite::types::Value {
  match p {
    Param::Text(s) => rusqlite::types::Value::Text(s.clone()),
    Param::Int(i) => rusqlite::types::Value::Integer(*i),
  }
}

/// Decode one row of the shared [`Transaction::COLUMNS`] SELECT list.
fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
  Ok(Transaction {
    transaction_id:      row.get(0)?,
    date:                row.get(1)?,
    customer_id:         row.get(2)?,
    customer_name:       row.get(3)?,
    phone_number:        row.get(4)?,
    gender:              row.get(5)?,
    age:                 row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
    customer_region:     row.get(7)?,
    customer_type:       row.get(8)?,
    product_id:          row.get(9)?,
    product_name:        row.get(10)?,
    brand:               row.get(11)?,
    product_category:    row.get(12)?,
    tags:                row.get(13)?,
    quantity:            row.get::<_, Option<i64>>(14)?.unwrap_or_default(),
    price_per_unit:      row.get::<_, Option<f64>>(15)?.unwrap_or_default(),
    discount_percentage: row.get::<_, Option<f64>>(16)?.unwrap_or_default(),
    total_amount:        row.get::<_, Option<f64>>(17)?.unwrap_or_default(),
    final_amount:        row.get::<_, Option<f64>>(18)?.unwrap_or_default(),
    payment_method:      row.get(19)?,
    order_status:        row.get(20)?,
    delivery_type:       row.get(21)?,
    store_id:            row.get(22)?,
    store_location:      row.get(23)?,
    salesperson_id:      row.get(24)?,
    employee_name:       row.get(25)?,
  })
}

/// `SELECT DISTINCT column … ORDER BY column` over non-null values.
fn distinct_values(
  conn: &rusqlite::Connection,
  column: &str,
) -> rusqlite::Result<Vec<String>> {
  let sql = format!(
    "SELECT DISTINCT {column} FROM transactions \
     WHERE {column} IS NOT NULL ORDER BY {column}"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map([], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(rows)
}

// ─── TransactionStore impl ───────────────────────────────────────────────────

impl TransactionStore for SqliteStore {
  type Error = Error;

  async fn query_transactions(
    &self,
    page: u32,
    page_size: u32,
    filter: TransactionFilter,
    sort_by: SortField,
    sort_order: SortOrder,
  ) -> Result<Page> {
    let current_page = page.max(1);
    let page_size = page_size.max(1);

    let style = Placeholders::Anonymous;
    let filter_sql = sql::build_filter(&filter, style);
    let order_clause = sql::order_by(sort_by, sort_order);
    let limit_slot = style.nth(filter_sql.params.len() + 1);
    let offset_slot = style.nth(filter_sql.params.len() + 2);
    let offset = query::page_offset(current_page, page_size);

    let (total_records, transactions) = self
      .conn
      .call(move |conn| {
        let params: Vec<rusqlite::types::Value> =
          filter_sql.params.iter().map(bind_value).collect();

        // Count and page queries share the predicate verbatim.
        let count_sql =
          format!("SELECT COUNT(*) FROM transactions {}", filter_sql.where_clause);
        let total: i64 = conn.query_row(
          &count_sql,
          rusqlite::params_from_iter(params.iter().cloned()),
          |row| row.get(0),
        )?;

        let data_sql = format!(
          "SELECT {} FROM transactions {} {} LIMIT {limit_slot} OFFSET {offset_slot}",
          Transaction::column_list(),
          filter_sql.where_clause,
          order_clause,
        );

        let mut data_params = params;
        data_params.push(rusqlite::types::Value::Integer(page_size as i64));
        data_params.push(rusqlite::types::Value::Integer(offset as i64));

        let mut stmt = conn.prepare(&data_sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(data_params), row_to_transaction)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total as u64, rows))
      })
      .await?;

    Ok(Page {
      transactions,
      current_page,
      total_pages: query::total_pages(total_records, page_size),
      total_records,
      page_size,
    })
  }

  async fn filter_options(&self) -> Result<FacetOptions> {
    let options = self
      .conn
      .call(|conn| {
        let regions = distinct_values(conn, "customer_region")?;
        let genders = distinct_values(conn, "gender")?;
        let categories = distinct_values(conn, "product_category")?;
        let payment_methods = distinct_values(conn, "payment_method")?;

        let mut stmt = conn
          .prepare("SELECT DISTINCT tags FROM transactions WHERE tags IS NOT NULL")?;
        let tag_rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        let tags = query::tag_vocabulary(tag_rows.iter().map(String::as_str));

        Ok(FacetOptions { regions, genders, categories, tags, payment_methods })
      })
      .await?;

    Ok(options)
  }

  async fn record_count(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn insert_batch(&self, rows: Vec<Transaction>) -> Result<()> {
    let slots: Vec<String> = (1..=Transaction::COLUMNS.len())
      .map(|n| Placeholders::Anonymous.nth(n))
      .collect();
    let insert_sql = format!(
      "INSERT INTO transactions ({}) VALUES ({})",
      Transaction::column_list(),
      slots.join(", "),
    );

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&insert_sql)?;
          for t in &rows {
            stmt.execute(rusqlite::params![
              t.transaction_id,
              t.date,
              t.customer_id,
              t.customer_name,
              t.phone_number,
              t.gender,
              t.age,
              t.customer_region,
              t.customer_type,
              t.product_id,
              t.product_name,
              t.brand,
              t.product_category,
              t.tags,
              t.quantity,
              t.price_per_unit,
              t.discount_percentage,
              t.total_amount,
              t.final_amount,
              t.payment_method,
              t.order_status,
              t.delivery_type,
              t.store_id,
              t.store_location,
              t.salesperson_id,
              t.employee_name,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM transactions", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
