//! Inventory CRUD on an org's database.
//!
//! [`InventoryQuery`] wraps a borrowed connection and issues the
//! parameterized statements behind the create-*/show-* CLI commands. The
//! tables themselves (`Customers`, `Products`, `Orders`) come from the
//! migration files; this module only reads and writes rows.

use org_store_core::{Customer, Order, Product};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Result, SqliteError};

/// Query interface for one org's inventory tables.
///
/// # Examples
///
/// ```no_run
/// use org_store_sqlite::{InventoryQuery, OrgStore};
///
/// let conn = OrgStore::new("data").open("acme").unwrap();
/// let query = InventoryQuery::new(conn.connection());
///
/// let customer = query.insert_customer("ada@example.com", "CA").unwrap();
/// let found = query.list_customers("ada", "").unwrap();
/// assert_eq!(found[0].id, customer.id);
/// ```
pub struct InventoryQuery<'a> {
    conn: &'a Connection,
}

impl<'a> InventoryQuery<'a> {
    /// Creates a query interface over `conn`.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a customer and returns the stored row.
    ///
    /// The caller validates the state code; this layer stores what it is
    /// given.
    pub fn insert_customer(&self, email: &str, state: &str) -> Result<Customer> {
        self.conn.execute(
            "INSERT INTO Customers (email, state) VALUES (?1, ?2)",
            params![email, state],
        )?;

        Ok(Customer {
            id: self.conn.last_insert_rowid(),
            email: email.to_string(),
            state: state.to_string(),
        })
    }

    /// Inserts a product, with or without a SKU, and returns the stored row.
    pub fn insert_product(&self, name: &str, price: f64, sku: Option<&str>) -> Result<Product> {
        match sku {
            Some(sku) => self.conn.execute(
                "INSERT INTO Products (name, price, sku) VALUES (?1, ?2, ?3)",
                params![name, price, sku],
            )?,
            None => self.conn.execute(
                "INSERT INTO Products (name, price) VALUES (?1, ?2)",
                params![name, price],
            )?,
        };

        Ok(Product {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            price,
            sku: sku.map(String::from),
        })
    }

    /// Inserts an order after checking both referenced rows exist.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::CustomerMissing`] or
    /// [`SqliteError::ProductMissing`] so the CLI can say which id was
    /// wrong, rather than surfacing a bare foreign-key violation.
    pub fn insert_order(&self, customer_id: i64, product_id: i64) -> Result<Order> {
        if !self.row_exists("Customers", customer_id)? {
            return Err(SqliteError::CustomerMissing(customer_id));
        }
        if !self.row_exists("Products", product_id)? {
            return Err(SqliteError::ProductMissing(product_id));
        }

        self.conn.execute(
            "INSERT INTO Orders (customer_id, product_id) VALUES (?1, ?2)",
            params![customer_id, product_id],
        )?;
        let id = self.conn.last_insert_rowid();

        let created_at = self
            .conn
            .query_row(
                "SELECT created_at FROM Orders WHERE id = ?1",
                params![id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();

        Ok(Order {
            id,
            created_at,
            customer_id,
            product_id,
        })
    }

    /// Lists customers matching the email and state substring filters.
    ///
    /// Empty filters match everything.
    pub fn list_customers(&self, email: &str, state: &str) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, email, state FROM Customers \
             WHERE email LIKE '%' || ?1 || '%' AND state LIKE '%' || ?2 || '%' \
             ORDER BY id",
        )?;

        let rows = stmt.query_map(params![email, state], |row| {
            Ok(Customer {
                id: row.get(0)?,
                email: row.get(1)?,
                state: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Lists products matching the name substring filter.
    pub fn list_products(&self, name: &str) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, price, sku FROM Products \
             WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
        )?;

        let rows = stmt.query_map(params![name], |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                price: row.get(2)?,
                sku: row.get(3)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Lists orders, optionally filtered by customer and/or product id.
    pub fn list_orders(
        &self,
        customer_id: Option<i64>,
        product_id: Option<i64>,
    ) -> Result<Vec<Order>> {
        let base = "SELECT id, created_at, customer_id, product_id FROM Orders";
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(Order {
                id: row.get(0)?,
                created_at: row.get(1)?,
                customer_id: row.get(2)?,
                product_id: row.get(3)?,
            })
        };

        let rows = match (customer_id, product_id) {
            (Some(c), Some(p)) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{base} WHERE customer_id = ?1 AND product_id = ?2 ORDER BY id"
                ))?;
                let rows = stmt.query_map(params![c, p], map_row)?;
                rows.collect::<std::result::Result<_, _>>()?
            }
            (Some(c), None) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} WHERE customer_id = ?1 ORDER BY id"))?;
                let rows = stmt.query_map(params![c], map_row)?;
                rows.collect::<std::result::Result<_, _>>()?
            }
            (None, Some(p)) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} WHERE product_id = ?1 ORDER BY id"))?;
                let rows = stmt.query_map(params![p], map_row)?;
                rows.collect::<std::result::Result<_, _>>()?
            }
            (None, None) => {
                let mut stmt = self.conn.prepare(&format!("{base} ORDER BY id"))?;
                let rows = stmt.query_map([], map_row)?;
                rows.collect::<std::result::Result<_, _>>()?
            }
        };

        Ok(rows)
    }

    fn row_exists(&self, table: &str, id: i64) -> Result<bool> {
        // Table names are fixed strings from this module, never user input.
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1"),
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
