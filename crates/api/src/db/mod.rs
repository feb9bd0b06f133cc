//! Database operations for the hub's `PostgreSQL` store.
//!
//! # Collections
//!
//! Documents are schema-flexible: each collection is a table with a
//! store-generated UUID primary key and a single `JSONB` column holding the
//! client-supplied document verbatim.
//!
//! - `products` - supplier catalogue entries
//! - `imports` - recorded import transactions
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p ihub-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub mod imports;
pub mod products;

pub use imports::ImportRepository;
pub use products::ProductRepository;

/// Errors that can occur in repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested document was not found.
    #[error("not found")]
    NotFound,

    /// A conditional quantity decrement found less stock than requested,
    /// or a stock value that is not a number.
    #[error("insufficient available quantity")]
    InsufficientStock,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is created once at startup and shared by all handlers for the
/// process lifetime.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Inject the store-generated identifier into a document before returning
/// it to the client.
///
/// Clients send bodies without an `id`; reads always carry one. A
/// client-supplied `id` field is overwritten rather than trusted.
#[must_use]
pub fn attach_id(id: Uuid, mut doc: Value) -> Value {
    if let Value::Object(map) = &mut doc {
        map.insert("id".to_owned(), Value::String(id.to_string()));
    }
    doc
}

/// Convert rows of `(id, doc)` into documents carrying their id.
pub(crate) fn rows_to_docs(rows: &[PgRow]) -> Vec<Value> {
    rows.iter()
        .map(|r| attach_id(r.get::<Uuid, _>("id"), r.get::<Value, _>("doc")))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attach_id_inserts_field() {
        let id = Uuid::new_v4();
        let doc = attach_id(id, json!({"product_name": "Jute Bags"}));
        assert_eq!(doc["id"], json!(id.to_string()));
        assert_eq!(doc["product_name"], json!("Jute Bags"));
    }

    #[test]
    fn test_attach_id_overwrites_client_value() {
        let id = Uuid::new_v4();
        let doc = attach_id(id, json!({"id": "spoofed"}));
        assert_eq!(doc["id"], json!(id.to_string()));
    }

    #[test]
    fn test_attach_id_ignores_non_objects() {
        let id = Uuid::new_v4();
        let doc = attach_id(id, json!([1, 2, 3]));
        assert_eq!(doc, json!([1, 2, 3]));
    }
}
