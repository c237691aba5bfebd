//! SQL schema for the Till PostgreSQL store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Mirrors the SQLite schema column for column. `date` stays `DD-MM-YYYY`
/// text here too, so the textual range-comparison semantics are identical
/// across backends.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id                  BIGSERIAL PRIMARY KEY,
    transaction_id      TEXT,
    date                TEXT,
    customer_id         TEXT,
    customer_name       TEXT,
    phone_number        TEXT,
    gender              TEXT,
    age                 BIGINT,
    customer_region     TEXT,
    customer_type       TEXT,
    product_id          TEXT,
    product_name        TEXT,
    brand               TEXT,
    product_category    TEXT,
    tags                TEXT,
    quantity            BIGINT,
    price_per_unit      DOUBLE PRECISION,
    discount_percentage DOUBLE PRECISION,
    total_amount        DOUBLE PRECISION,
    final_amount        DOUBLE PRECISION,
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
