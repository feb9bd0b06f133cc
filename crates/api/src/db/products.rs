//! Product repository for database operations.
//!
//! Products are stored as raw `JSONB` documents keyed by a store-generated
//! UUID. Queries address well-known fields (`product_name`,
//! `supplier_email`, `import_date`, `available_quantity`) through `JSONB`
//! operators; everything else the client sent rides along untouched.

use serde_json::Value;
use sqlx::{PgPool, Row};

use ihub_core::{Email, ProductId};

use super::{RepositoryError, attach_id, rows_to_docs};

/// Number of products returned by the latest-products query.
pub const LATEST_LIMIT: i64 = 6;

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, unfiltered and unpaginated.
    ///
    /// The result set is unbounded; that is the documented contract of
    /// `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Value>, RepositoryError> {
        let rows = sqlx::query("SELECT id, doc FROM products")
            .fetch_all(self.pool)
            .await?;

        Ok(rows_to_docs(&rows))
    }

    /// Get a single product by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Value>, RepositoryError> {
        let row = sqlx::query("SELECT id, doc FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|r| attach_id(r.get("id"), r.get("doc"))))
    }

    /// List products whose `supplier_email` exactly matches the given email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_supplier(&self, email: &Email) -> Result<Vec<Value>, RepositoryError> {
        let rows = sqlx::query("SELECT id, doc FROM products WHERE doc->>'supplier_email' = $1")
            .bind(email.as_str())
            .fetch_all(self.pool)
            .await?;

        Ok(rows_to_docs(&rows))
    }

    /// The [`LATEST_LIMIT`] most recent products by `import_date`,
    /// descending. Ties keep store-default order; documents without an
    /// `import_date` sort last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self) -> Result<Vec<Value>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, doc FROM products
            ORDER BY doc->>'import_date' DESC NULLS LAST
            LIMIT $1
            ",
        )
        .bind(LATEST_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows_to_docs(&rows))
    }

    /// Case-insensitive substring search on `product_name`.
    ///
    /// An empty result is a normal empty array, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Value>, RepositoryError> {
        let rows = sqlx::query("SELECT id, doc FROM products WHERE doc->>'product_name' ILIKE $1")
            .bind(like_pattern(name))
            .fetch_all(self.pool)
            .await?;

        Ok(rows_to_docs(&rows))
    }

    /// Insert the request body verbatim as a new product document.
    ///
    /// Returns the stored document with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, doc: &Value) -> Result<Value, RepositoryError> {
        let row = sqlx::query("INSERT INTO products (doc) VALUES ($1) RETURNING id")
            .bind(doc)
            .fetch_one(self.pool)
            .await?;

        Ok(attach_id(row.get("id"), doc.clone()))
    }

    /// Merge the provided fields into an existing product document.
    ///
    /// Only top-level fields present in `patch` are replaced (`doc || patch`
    /// semantics). Returns the updated document, or `None` if no product has
    /// this identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &Value,
    ) -> Result<Option<Value>, RepositoryError> {
        let row = sqlx::query(
            r"
            UPDATE products SET doc = doc || $2
            WHERE id = $1
            RETURNING id, doc
            ",
        )
        .bind(id)
        .bind(patch)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| attach_id(r.get("id"), r.get("doc"))))
    }

    /// Delete a product by identifier.
    ///
    /// Returns the number of documents removed. Zero is a successful
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Build an `ILIKE` pattern matching the needle anywhere in the value,
/// with LIKE metacharacters in the needle escaped so they match literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
