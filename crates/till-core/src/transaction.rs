//! The [`Transaction`] row type and its column list.
//!
//! One struct field per column of the `transactions` table. The JSON field
//! names are the display names the browsing UI was built against
//! (`"Transaction ID"`, `"Customer Name"`, …), so the wire contract survives
//! the reimplementation unchanged.

use serde::{Deserialize, Serialize};

/// One sales transaction, as stored and as served.
///
/// All text columns are nullable; `transaction_id` carries no uniqueness
/// constraint. `date` is opaque text in `DD-MM-YYYY` form — not a native
/// date type, and not lexicographically sortable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
  #[serde(rename = "Transaction ID")]
  pub transaction_id:      Option<String>,
  #[serde(rename = "Date")]
  pub date:                Option<String>,
  #[serde(rename = "Customer ID")]
  pub customer_id:         Option<String>,
  #[serde(rename = "Customer Name")]
  pub customer_name:       Option<String>,
  #[serde(rename = "Phone Number")]
  pub phone_number:        Option<String>,
  #[serde(rename = "Gender")]
  pub gender:              Option<String>,
  #[serde(rename = "Age")]
  pub age:                 i64,
  #[serde(rename = "Customer Region")]
  pub customer_region:     Option<String>,
  #[serde(rename = "Customer Type")]
  pub customer_type:       Option<String>,
  #[serde(rename = "Product ID")]
  pub product_id:          Option<String>,
  #[serde(rename = "Product Name")]
  pub product_name:        Option<String>,
  #[serde(rename = "Brand")]
  pub brand:               Option<String>,
  #[serde(rename = "Product Category")]
  pub product_category:    Option<String>,
  /// Comma-joined free-form labels, e.g. `"fragile,gift wrap"`. Denormalized
  /// by design; the tag vocabulary is derived by splitting every row.
  #[serde(rename = "Tags")]
  pub tags:                Option<String>,
  #[serde(rename = "Quantity")]
  pub quantity:            i64,
  #[serde(rename = "Price per Unit")]
  pub price_per_unit:      f64,
  #[serde(rename = "Discount Percentage")]
  pub discount_percentage: f64,
  #[serde(rename = "Total Amount")]
  pub total_amount:        f64,
  #[serde(rename = "Final Amount")]
  pub final_amount:        f64,
  #[serde(rename = "Payment Method")]
  pub payment_method:      Option<String>,
  #[serde(rename = "Order Status")]
  pub order_status:        Option<String>,
  #[serde(rename = "Delivery Type")]
  pub delivery_type:       Option<String>,
  #[serde(rename = "Store ID")]
  pub store_id:            Option<String>,
  #[serde(rename = "Store Location")]
  pub store_location:      Option<String>,
  #[serde(rename = "Salesperson ID")]
  pub salesperson_id:      Option<String>,
  #[serde(rename = "Employee Name")]
  pub employee_name:       Option<String>,
}

impl Transaction {
  /// Column names in declaration order, shared by both backends so SELECT,
  /// INSERT, and row decoding always agree on positions.
  pub const COLUMNS: [&'static str; 26] = [
    "transaction_id",
    "date",
    "customer_id",
    "customer_name",
    "phone_number",
    "gender",
    "age",
    "customer_region",
    "customer_type",
    "product_id",
    "product_name",
    "brand",
    "product_category",
    "tags",
    "quantity",
    "price_per_unit",
    "discount_percentage",
    "total_amount",
    "final_amount",
    "payment_method",
    "order_status",
    "delivery_type",
    "store_id",
    "store_location",
    "salesperson_id",
    "employee_name",
  ];

  /// The comma-joined column list for SELECT/INSERT statements.
  pub fn column_list() -> String {
    Self::COLUMNS.join(", ")
  }
}
