//! SQL schema for the Till SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

/// Full schema DDL.
///
/// Notes on the shape of the data:
/// - `transaction_id` intentionally carries no UNIQUE constraint; the
///   source data does not guarantee uniqueness.
/// - `tags` is a denormalized comma-joined list, not a separate relation.
/// - `date` is `DD-MM-YYYY` text, compared textually by the query path.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS transactions (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_id      TEXT,
    date                TEXT,    -- DD-MM-YYYY; not lexicographically sortable
    customer_id         TEXT,
    customer_name       TEXT,
    phone_number        TEXT,
    gender              TEXT,
    age                 INTEGER,
    customer_region     TEXT,
    customer_type       TEXT,
    product_id          TEXT,
    product_name        TEXT,
    brand               TEXT,
    product_category    TEXT,
    tags                TEXT,    -- comma-joined free-form labels
    quantity            INTEGER,
    price_per_unit      REAL,
    discount_percentage REAL,
    total_amount        REAL,
    final_amount        REAL,
    payment_method      TEXT,
    order_status        TEXT,
    delivery_type       TEXT,
    store_id            TEXT,
    store_location      TEXT,
    salesperson_id      TEXT,
    employee_name       TEXT
);

CREATE INDEX IF NOT EXISTS idx_customer_name    ON transactions(customer_name);
CREATE INDEX IF NOT EXISTS idx_phone_number     ON transactions(phone_number);
CREATE INDEX IF NOT EXISTS idx_customer_region  ON transactions(customer_region);
CREATE INDEX IF NOT EXISTS idx_gender           ON transactions(gender);
CREATE INDEX IF NOT EXISTS idx_product_category ON transactions(product_category);
CREATE INDEX IF NOT EXISTS idx_payment_method   ON transactions(payment_method);
CREATE INDEX IF NOT EXISTS idx_date             ON transactions(date);
";
