//! Import repository for database operations.
//!
//! Recording an import touches two documents: the import record itself and
//! the referenced product's `available_quantity`. Both writes happen in a
//! single transaction, with the decrement conditional on sufficient stock,
//! so concurrent imports against the same product cannot lose updates or
//! drive the quantity negative.

use serde_json::Value;
use sqlx::{PgPool, Row};

use ihub_core::{Email, ImportId, ProductId};

use super::{RepositoryError, attach_id, rows_to_docs};

/// Repository for import database operations.
pub struct ImportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ImportRepository<'a> {
    /// Create a new import repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Atomically record an import against a product.
    ///
    /// In one transaction:
    /// 1. decrement the product's `available_quantity`, conditional on
    ///    `available_quantity >= quantity`;
    /// 2. insert `doc` (the full request body) as the import record.
    ///
    /// The precondition checks `jsonb_typeof` before touching the value, so
    /// products whose `available_quantity` is missing or holds a non-number
    /// (stored documents are schema-free) fail it cleanly instead of raising
    /// a cast error. The arithmetic runs as `numeric`, which covers
    /// fractional stock values too.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if no product has this identifier;
    ///   nothing is written.
    /// - `RepositoryError::InsufficientStock` if the product holds less
    ///   than `quantity`; nothing is written.
    /// - `RepositoryError::Database` for driver failures.
    pub async fn apply(
        &self,
        product_id: ProductId,
        quantity: i64,
        doc: &Value,
    ) -> Result<Value, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // CASE forces the type check to run before the cast; a bare AND
        // would leave the evaluation order up to the planner.
        let decremented = sqlx::query(
            r"
            UPDATE products
            SET doc = jsonb_set(
                doc,
                '{available_quantity}',
                to_jsonb((doc->>'available_quantity')::numeric - $2)
            )
            WHERE id = $1
              AND CASE
                    WHEN jsonb_typeof(doc->'available_quantity') = 'number'
                        THEN (doc->>'available_quantity')::numeric >= $2
                    ELSE false
                  END
            ",
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if decremented == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                    .bind(product_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return Err(if exists {
                RepositoryError::InsufficientStock
            } else {
                RepositoryError::NotFound
            });
        }

        let row = sqlx::query("INSERT INTO imports (doc) VALUES ($1) RETURNING id")
            .bind(doc)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(attach_id(row.get("id"), doc.clone()))
    }

    /// List import records, optionally filtered by exact `importer_email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, importer: Option<&Email>) -> Result<Vec<Value>, RepositoryError> {
        let rows = match importer {
            Some(email) => {
                sqlx::query("SELECT id, doc FROM imports WHERE doc->>'importer_email' = $1")
                    .bind(email.as_str())
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT id, doc FROM imports")
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(rows_to_docs(&rows))
    }

    /// Delete an import record by identifier.
    ///
    /// Does NOT restore the referenced product's `available_quantity`;
    /// deleting an import is bookkeeping, not a compensating transaction.
    /// Returns the number of documents removed; zero is a successful
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ImportId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM imports WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
