//! Domain type definitions for the inventory store.
//!
//! These types mirror the rows of the per-org `Customers`, `Products`, and
//! `Orders` tables. They derive [`serde`] traits so they can round-trip
//! through JSON output modes and test fixtures without bespoke mapping code.

use serde::{Deserialize, Serialize};

/// A customer row.
///
/// # Examples
///
/// ```
/// use org_store_core::Customer;
///
/// let c = Customer {
///     id: 1,
///     email: "ada@example.com".into(),
///     state: "CA".into(),
/// };
/// assert_eq!(c.state, "CA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Auto-assigned row id.
    pub id: i64,
    /// Contact email address.
    pub email: String,
    /// Two-letter US state or territory code.
    pub state: String,
}

/// A product row.
///
/// The SKU is optional: products created without one store SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Auto-assigned row id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unit price in dollars.
    pub price: f64,
    /// Optional stock-keeping unit code.
    pub sku: Option<String>,
}

/// An order row linking a customer to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Auto-assigned row id.
    pub id: i64,
    /// Creation timestamp as stored by the database, if the schema records one.
    pub created_at: Option<String>,
    /// Id of the ordering customer.
    pub customer_id: i64,
    /// Id of the ordered product.
    pub product_id: i64,
}
