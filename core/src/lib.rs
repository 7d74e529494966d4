//! Core domain types and input validation for the org-store inventory tool.
//!
//! This crate defines the row types shared across storage and CLI layers:
//!
//! - [`Customer`] — a customer with email and US state code.
//! - [`Product`] — a product with optional SKU.
//! - [`Order`] — an order linking a customer to a product.
//!
//! Validation ([`validate_state`], [`validate_org_name`]) catches bad
//! CLI input before it reaches the database.
//!
//! # Example
//!
//! ```
//! use org_store_core::{Customer, validate_state};
//!
//! let state = validate_state("wa").unwrap();
//! let customer = Customer {
//!     id: 1,
//!     email: "pat@example.com".into(),
//!     state,
//! };
//! assert_eq!(customer.state, "WA");
//! ```

mod types;
mod validate;

pub use types::{Customer, Order, Product};
pub use validate::{ValidationError, validate_org_name, validate_state};
