//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/find/save/delete over the `products` table.
//! - Hand out transaction scopes bound to the same connection.
//!
//! # Invariants
//! - `save` assigns an id only when the record has none.
//! - `save` and `delete` of a missing row return `NotFound(id)`, never a
//!   silent no-op.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::product::{Product, ProductId};
use crate::repo::transaction::{SqliteTransaction, TransactionMode, TransactionScope};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    price,
    description,
    stock_quantity
FROM products";

const PRODUCTS_TABLE: &str = "products";
const REQUIRED_COLUMNS: &[&str] = &["id", "name", "price", "description", "stock_quantity"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ProductId),
    /// Operation needs a stored row but the record has no id.
    Unpersisted,
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::Unpersisted => write!(f, "product has not been saved yet"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Persistence collaborator for products.
pub trait ProductRepository {
    type Transaction<'a>: TransactionScope
    where
        Self: 'a;

    /// Opens a scope; repository calls made while it is alive belong to it.
    fn begin(&self, mode: TransactionMode) -> RepoResult<Self::Transaction<'_>>;
    /// Returns every stored product ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Product>>;
    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Inserts when `product` has no id, otherwise updates the matching row.
    fn save(&self, product: &Product) -> RepoResult<Product>;
    fn delete(&self, product: &Product) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Rejects raw connections that did not go through `db::open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    type Transaction<'a>
        = SqliteTransaction<'a>
    where
        Self: 'a;

    fn begin(&self, mode: TransactionMode) -> RepoResult<SqliteTransaction<'_>> {
        SqliteTransaction::begin(self.conn, mode)
    }

    fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let product = self
            .conn
            .query_row(
                &format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_product_row,
            )
            .optional()?;

        Ok(product)
    }

    fn save(&self, product: &Product) -> RepoResult<Product> {
        let Some(id) = product.id() else {
            self.conn.execute(
                "INSERT INTO products (
                    name,
                    price,
                    description,
                    stock_quantity
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    product.name.as_str(),
                    product.price,
                    product.description.as_deref(),
                    product.stock_quantity,
                ],
            )?;

            let id = self.conn.last_insert_rowid();
            return Ok(product.clone().with_id(id));
        };

        let changed = self.conn.execute(
            "UPDATE products
             SET
                name = ?1,
                price = ?2,
                description = ?3,
                stock_quantity = ?4
             WHERE id = ?5;",
            params![
                product.name.as_str(),
                product.price,
                product.description.as_deref(),
                product.stock_quantity,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(product.clone())
    }

    fn delete(&self, product: &Product) -> RepoResult<()> {
        let id = product.id().ok_or(RepoError::Unpersisted)?;
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let product = Product::new(
        row.get::<_, String>("name")?,
        row.get("price")?,
        row.get("description")?,
        row.get("stock_quantity")?,
    );
    Ok(product.with_id(row.get("id")?))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [PRODUCTS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(PRODUCTS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([PRODUCTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|name| name.as_str() == *required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: PRODUCTS_TABLE,
            column,
        });
    }

    Ok(())
}
