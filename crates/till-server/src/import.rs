//! Guarded CSV bulk loader.
//!
//! Reads a delimited export whose headers are the display names
//! (`Transaction ID`, `Date`, …), coerces numeric fields with a zero
//! fallback, and writes rows to the store in transactional batches. Refuses
//! to write into a non-empty table unless `--force` is given, in which case
//! the table is truncated first.

use std::{collections::HashMap, path::Path};

use anyhow::{Context as _, bail};
use till_core::{store::TransactionStore, transaction::Transaction};

const BATCH_SIZE: usize = 500;

/// Run the import. `force` truncates a non-empty table; without it a
/// non-empty table aborts the import.
pub async fn run<S>(store: &S, csv_path: &Path, force: bool) -> anyhow::Result<()>
where
  S: TransactionStore,
{
  let existing = store
    .record_count()
    .await
    .context("checking for existing rows")?;
  if existing > 0 {
    if !force {
      bail!(
        "table already holds {existing} rows; pass --force to truncate and re-import"
      );
    }
    tracing::warn!(existing, "truncating existing rows before import");
    store.clear().await.context("truncating table")?;
  }

  let mut reader = csv::Reader::from_path(csv_path)
    .with_context(|| format!("opening CSV file {}", csv_path.display()))?;
  let mapper = RowMapper::from_headers(reader.headers().context("reading CSV headers")?);

  let mut batch = Vec::with_capacity(BATCH_SIZE);
  let mut imported: u64 = 0;

  for record in reader.records() {
    let record = record.context("reading CSV record")?;
    batch.push(mapper.transaction(&record));

    if batch.len() >= BATCH_SIZE {
      imported += batch.len() as u64;
      store
        .insert_batch(std::mem::take(&mut batch))
        .await
        .context("inserting batch")?;
      tracing::info!(imported, "imported rows");
    }
  }

  if !batch.is_empty() {
    imported += batch.len() as u64;
    store
      .insert_batch(batch)
      .await
      .context("inserting final batch")?;
  }

  let total = store.record_count().await.context("verifying import")?;
  tracing::info!(imported, total, "import complete");
  Ok(())
}

// ─── Row mapping ──────────────────────────────────────────────────────────────

/// Maps display-name headers to record positions.
struct RowMapper {
  index: HashMap<String, usize>,
}

impl RowMapper {
  fn from_headers(headers: &csv::StringRecord) -> Self {
    let index = headers
      .iter()
      .enumerate()
      // Exports from spreadsheet tools often carry a UTF-8 BOM glued to the
      // first header.
      .map(|(i, h)| (h.trim_start_matches('\u{feff}').to_owned(), i))
      .collect();
    Self { index }
  }

  /// A text field; missing columns and empty values become `None` so the
  /// store holds NULL rather than the empty string.
  fn text(&self, record: &csv::StringRecord, header: &str) -> Option<String> {
    self
      .index
      .get(header)
      .and_then(|&i| record.get(i))
      .filter(|v| !v.is_empty())
      .map(str::to_owned)
  }

  /// An integer field, 0 on missing or unparseable values.
  fn int(&self, record: &csv::StringRecord, header: &str) -> i64 {
    self
      .index
      .get(header)
      .and_then(|&i| record.get(i))
      .and_then(|v| v.trim().parse().ok())
      .unwrap_or(0)
  }

  /// A decimal field, 0.0 on missing or unparseable values.
  fn real(&self, record: &csv::StringRecord, header: &str) -> f64 {
    self
      .index
      .get(header)
      .and_then(|&i| record.get(i))
      .and_then(|v| v.trim().parse().ok())
      .unwrap_or(0.0)
  }

  fn transaction(&self, record: &csv::StringRecord) -> Transaction {
    Transaction {
      transaction_id:      self.text(record, "Transaction ID"),
      date:                self.text(record, "Date"),
      customer_id:         self.text(record, "Customer ID"),
      customer_name:       self.text(record, "Customer Name"),
      phone_number:        self.text(record, "Phone Number"),
      gender:              self.text(record, "Gender"),
      age:                 self.int(record, "Age"),
      customer_region:     self.text(record, "Customer Region"),
      customer_type:       self.text(record, "Customer Type"),
      product_id:          self.text(record, "Product ID"),
      product_name:        self.text(record, "Product Name"),
      brand:               self.text(record, "Brand"),
      product_category:    self.text(record, "Product Category"),
      tags:                self.text(record, "Tags"),
      quantity:            self.int(record, "Quantity"),
      price_per_unit:      self.real(record, "Price per Unit"),
      discount_percentage: self.real(record, "Discount Percentage"),
      total_amount:        self.real(record, "Total Amount"),
      final_amount:        self.real(record, "Final Amount"),
      payment_method:      self.text(record, "Payment Method"),
      order_status:        self.text(record, "Order Status"),
      delivery_type:       self.text(record, "Delivery Type"),
      store_id:            self.text(record, "Store ID"),
      store_location:      self.text(record, "Store Location"),
      salesperson_id:      self.text(record, "Salesperson ID"),
      employee_name:       self.text(record, "Employee Name"),
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn read_all(csv_text: &str) -> Vec<Transaction> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let mapper = RowMapper::from_headers(reader.headers().unwrap());
    reader
      .records()
      .map(|r| mapper.transaction(&r.unwrap()))
      .collect()
  }

  #[test]
  fn maps_display_name_headers() {
    let rows = read_all(
      "Transaction ID,Customer Name,Age,Final Amount\n\
       T-1,John Doe,34,199.50\n",
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].transaction_id.as_deref(), Some("T-1"));
    assert_eq!(rows[0].customer_name.as_deref(), Some("John Doe"));
    assert_eq!(rows[0].age, 34);
    assert_eq!(rows[0].final_amount, 199.50);
  }

  #[test]
  fn numeric_coercion_falls_back_to_zero() {
    let rows = read_all(
      "Transaction ID,Age,Quantity,Total Amount\n\
       T-1,not-a-number,,abc\n",
    );
    assert_eq!(rows[0].age, 0);
    assert_eq!(rows[0].quantity, 0);
    assert_eq!(rows[0].total_amount, 0.0);
  }

  #[test]
  fn empty_text_fields_become_null() {
    let rows = read_all(
      "Transaction ID,Customer Name,Tags\n\
       T-1,,\n",
    );
    assert_eq!(rows[0].customer_name, None);
    assert_eq!(rows[0].tags, None);
  }

  #[test]
  fn bom_on_first_header_is_stripped() {
    let rows = read_all(
      "\u{feff}Transaction ID,Customer Name\n\
       T-1,Jane\n",
    );
    assert_eq!(rows[0].transaction_id.as_deref(), Some("T-1"));
  }

  #[test]
  fn unknown_columns_are_ignored() {
    let rows = read_all(
      "Transaction ID,Loyalty Tier\n\
       T-1,Gold\n",
    );
    assert_eq!(rows[0].transaction_id.as_deref(), Some("T-1"));
    assert_eq!(rows[0].customer_name, None);
  }
}
