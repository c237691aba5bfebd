//! [`PostgresStore`] — the PostgreSQL implementation of [`TransactionStore`].

use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls, Row, types::ToSql};

use till_core::{
  query::{self, FacetOptions, Page, SortField, SortOrder, TransactionFilter},
  sql::{self, Param, Placeholders},
  store::TransactionStore,
  transaction::Transaction,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Till transaction store backed by a PostgreSQL database.
///
/// The client sits behind an async mutex: the import path needs exclusive
/// access for its transaction, and the read path is one bounded query per
/// request, so per-call locking costs nothing measurable here.
pub struct PostgresStore {
  client: Mutex<Client>,
}

impl PostgresStore {
  /// Connect to `url`, spawn the connection driver task, and run schema
  /// initialisation.
  pub async fn connect(url: &str) -> Result<Self> {
    let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

    tokio::spawn(async move {
      if let Err(e) = connection.await {
        tracing::error!("postgres connection error: {e}");
      }
    });

    client.batch_execute(SCHEMA).await?;
    Ok(Self { client: Mutex::new(client) })
  }
}

// ─── Binding and decoding ────────────────────────────────────────────────────

/// Borrow builder [`Param`]s as tokio-postgres bind values.
fn bind_values(params: &[Param]) -> Vec<&(dyn ToSql + Sync)> {
  params
    .iter()
    .map(|p| match p {
      Param::Text(s) => s as &(dyn ToSql + Sync),
      Param::Int(i) => i as &(dyn ToSql + Sync),
    })
    .collect()
}

/// Decode one row of the shared [`Transaction::COLUMNS`] SELECT list.
fn row_to_transaction(row: &Row) -> Transaction {
  Transaction {
    transaction_id:      row.get(0),
    date:                row.get(1),
    customer_id:         row.get(2),
    customer_name:       row.get(3),
    phone_number:        row.get(4),
    gender:              row.get(5),
    age:                 row.get::<_, Option<i64>>(6).unwrap_or_default(),
    customer_region:     row.get(7),
    customer_type:       row.get(8),
    product_id:          row.get(9),
    product_name:        row.get(10),
    brand:               row.get(11),
    product_category:    row.get(12),
    tags:                row.get(13),
    quantity:            row.get::<_, Option<i64>>(14).unwrap_or_default(),
    price_per_unit:      row.get::<_, Option<f64>>(15).unwrap_or_default(),
    discount_percentage: row.get::<_, Option<f64>>(16).unwrap_or_default(),
    total_amount:        row.get::<_, Option<f64>>(17).unwrap_or_default(),
    final_amount:        row.get::<_, Option<f64>>(18).unwrap_or_default(),
    payment_method:      row.get(19),
    order_status:        row.get(20),
    delivery_type:       row.get(21),
    store_id:            row.get(22),
    store_location:      row.get(23),
    salesperson_id:      row.get(24),
    employee_name:       row.get(25),
  }
}

async fn distinct_values(client: &Client, column: &str) -> Result<Vec<String>> {
  let sql = format!(
    "SELECT DISTINCT {column} FROM transactions \
     WHERE {column} IS NOT NULL ORDER BY {column}"
  );
  let rows = client.query(&sql, &[]).await?;
  Ok(rows.iter().map(|r| r.get(0)).collect())
}

// ─── TransactionStore impl ───────────────────────────────────────────────────

impl TransactionStore for PostgresStore {
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

    let style = Placeholders::Numbered;
    let filter_sql = sql::build_filter(&filter, style);
    let order_clause = sql::order_by(sort_by, sort_order);
    // LIMIT/OFFSET slots continue the filter's numbering.
    let limit_slot = style.nth(filter_sql.params.len() + 1);
    let offset_slot = style.nth(filter_sql.params.len() + 2);

    let client = self.client.lock().await;

    let count_sql =
      format!("SELECT COUNT(*) FROM transactions {}", filter_sql.where_clause);
    let params = bind_values(&filter_sql.params);
    let total: i64 = client.query_one(&count_sql, &params).await?.get(0);
    let total_records = total as u64;

    let data_sql = format!(
      "SELECT {} FROM transactions {} {} LIMIT {limit_slot} OFFSET {offset_slot}",
      Transaction::column_list(),
      filter_sql.where_clause,
      order_clause,
    );

    let limit = page_size as i64;
    let offset = query::page_offset(current_page, page_size) as i64;
    let mut data_params = params;
    data_params.push(&limit);
    data_params.push(&offset);

    let rows = client.query(&data_sql, &data_params).await?;
    let transactions = rows.iter().map(row_to_transaction).collect();

    Ok(Page {
      transactions,
      current_page,
      total_pages: query::total_pages(total_records, page_size),
      total_records,
      page_size,
    })
  }

  async fn filter_options(&self) -> Result<FacetOptions> {
    let client = self.client.lock().await;

    let regions = distinct_values(&client, "customer_region").await?;
    let genders = distinct_values(&client, "gender").await?;
    let categories = distinct_values(&client, "product_category").await?;
    let payment_methods = distinct_values(&client, "payment_method").await?;

    let tag_rows = client
      .query("SELECT DISTINCT tags FROM transactions WHERE tags IS NOT NULL", &[])
      .await?;
    let tags = query::tag_vocabulary(
      tag_rows.iter().map(|r| r.get::<_, &str>(0)),
    );

    Ok(FacetOptions { regions, genders, categories, tags, payment_methods })
  }

  async fn record_count(&self) -> Result<u64> {
    let client = self.client.lock().await;
    let total: i64 = client
      .query_one("SELECT COUNT(*) FROM transactions", &[])
      .await?
      .get(0);
    Ok(total as u64)
  }

  async fn insert_batch(&self, rows: Vec<Transaction>) -> Result<()> {
    let slots: Vec<String> = (1..=Transaction::COLUMNS.len())
      .map(|n| Placeholders::Numbered.nth(n))
      .collect();
    let insert_sql = format!(
      "INSERT INTO transactions ({}) VALUES ({})",
      Transaction::column_list(),
      slots.join(", "),
    );

    let mut client = self.client.lock().await;
    let tx = client.transaction().await?;
    let stmt = tx.prepare(&insert_sql).await?;

    for t in &rows {
      tx.execute(&stmt, &[
        &t.transaction_id,
        &t.date,
        &t.customer_id,
        &t.customer_name,
        &t.phone_number,
        &t.gender,
        &t.age,
        &t.customer_region,
        &t.customer_type,
        &t.product_id,
        &t.product_name,
        &t.brand,
        &t.product_category,
        &t.tags,
        &t.quantity,
        &t.price_per_unit,
        &t.discount_percentage,
        &t.total_amount,
        &t.final_amount,
        &t.payment_method,
        &t.order_status,
        &t.delivery_type,
        &t.store_id,
        &t.store_location,
        &t.salesperson_id,
        &t.employee_name,
      ])
      .await?;
    }

    tx.commit().await?;
    Ok(())
  }

  async fn clear(&self) -> Result<()> {
    let client = self.client.lock().await;
    client
      .execute("TRUNCATE TABLE transactions RESTART IDENTITY", &[])
      .await?;
    Ok(())
  }
}
