//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `Product` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Only validated `NewProduct`/`Product` values are written.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Rows are returned in id (insertion) order.

use crate::db::DbError;
use crate::model::product::{NewProduct, Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PRODUCT_COLUMNS: &str = "id, name, quantity, price, description";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ProductId),
    InvalidData(String),
}

impl RepoError {
    /// Whether the store refused the write because another connection held
    /// the database lock past the busy timeout.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if matches!(
                    err.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    fn list_products(&self) -> RepoResult<Vec<Product>>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn create_product(&self, product: &NewProduct) -> RepoResult<Product>;
    /// Replaces every field of the row with `product.id`.
    ///
    /// Returns `RepoError::NotFound` when no row was changed.
    fn update_product(&self, product: &Product) -> RepoResult<()>;
    /// Removes the row and returns it, or `None` when it did not exist.
    fn delete_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn product_exists(&self, id: ProductId) -> RepoResult<bool>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM Product ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PRODUCT_COLUMNS} FROM Product WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn create_product(&self, product: &NewProduct) -> RepoResult<Product> {
        self.conn.execute(
            "INSERT INTO Product (name, quantity, price, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                product.name.as_str(),
                product.quantity,
                product.price,
                product.description.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(product.clone().with_id(id))
    }

    fn update_product(&self, product: &Product) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE Product
             SET
                name = ?1,
                quantity = ?2,
                price = ?3,
                description = ?4
             WHERE id = ?5;",
            params![
                product.name.as_str(),
                product.quantity,
                product.price,
                product.description.as_str(),
                product.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(product.id));
        }

        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self.conn.prepare(&format!(
            "DELETE FROM Product WHERE id = ?1 RETURNING {PRODUCT_COLUMNS};"
        ))?;

        let mut rows = stmt.query([id])?;
        let deleted = match rows.next()? {
            Some(row) => Some(parse_product_row(row)?),
            None => None,
        };

        Ok(deleted)
    }

    fn product_exists(&self, id: ProductId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM Product WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let id: ProductId = row.get("id")?;

    Ok(Product {
        id,
        name: row.get("name")?,
        quantity: narrow_int(id, "quantity", row.get("quantity")?)?,
        price: narrow_int(id, "price", row.get("price")?)?,
        description: row.get("description")?,
    })
}

fn narrow_int(id: ProductId, column: &str, value: i64) -> RepoResult<i32> {
    i32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "value `{value}` out of range in Product.{column} for id {id}"
        ))
    })
}
