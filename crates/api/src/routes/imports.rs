//! Import route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use ihub_core::{Email, ImportId, ProductId};

use crate::db::ImportRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::products::require_object;

/// Query parameters for the import listing.
#[derive(Debug, Deserialize)]
pub struct ImportListQuery {
    /// Exact-match filter on `importer_email`.
    pub email: Option<String>,
}

/// `POST /imports` - record an import transaction.
///
/// The referenced product's `available_quantity` is decremented and the
/// request body stored as the import record, atomically. A missing product
/// is a 404 before any write; insufficient stock is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    require_object(&body)?;

    let product_id = body
        .get("product_id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::BadRequest("product_id is required".to_string()))?;
    let product_id = ProductId::parse(product_id)?;

    let quantity = import_quantity(&body)
        .ok_or_else(|| AppError::BadRequest("import_quantity must be an integer".to_string()))?;
    if quantity < 0 {
        return Err(AppError::BadRequest(
            "import_quantity must be non-negative".to_string(),
        ));
    }

    let created = ImportRepository::new(state.pool())
        .apply(product_id, quantity, &body)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /imports` - list import records, optionally filtered by
/// `?email=` exact match on `importer_email`.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Query(query): Query<ImportListQuery>,
) -> Result<Json<Vec<Value>>> {
    let importer = importer_filter(query.email.as_deref())?;

    let imports = ImportRepository::new(state.pool())
        .list(importer.as_ref())
        .await?;

    Ok(Json(imports))
}

/// `DELETE /imports/{id}` - remove an import record.
///
/// Does not restore the product's quantity; zero documents affected is a
/// successful outcome.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = ImportId::parse(&id)?;

    let deleted = ImportRepository::new(state.pool()).delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted_count": deleted })))
}

/// Read `import_quantity` from the request body.
///
/// Accepts a JSON integer or a string holding one; clients of the original
/// service sent both. Fractional numbers are rejected rather than
/// truncated.
/// Resolve the `?email=` query parameter to an importer filter.
///
/// An absent or empty parameter means "no filter"; a present non-empty
/// value must be a well-formed email address.
fn importer_filter(email: Option<&str>) -> Result<Option<Email>> {
    email
        .filter(|value| !value.is_empty())
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn import_quantity(body: &Value) -> Option<i64> {
    match body.get("import_quantity")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_import_quantity_integer() {
        assert_eq!(import_quantity(&json!({"import_quantity": 40})), Some(40));
    }

    #[test]
    fn test_import_quantity_numeric_string() {
        assert_eq!(
            import_quantity(&json!({"import_quantity": "25"})),
            Some(25)
        );
        assert_eq!(
            import_quantity(&json!({"import_quantity": " 7 "})),
            Some(7)
        );
    }

    #[test]
    fn test_import_quantity_missing_or_invalid() {
        assert_eq!(import_quantity(&json!({})), None);
        assert_eq!(import_quantity(&json!({"import_quantity": null})), None);
        assert_eq!(
            import_quantity(&json!({"import_quantity": "plenty"})),
            None
        );
        assert_eq!(import_quantity(&json!({"import_quantity": 2.5})), None);
    }

    #[test]
    fn test_import_quantity_negative_parses() {
        // The handler rejects negatives after parsing
        assert_eq!(import_quantity(&json!({"import_quantity": -3})), Some(-3));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_importer_filter_absent_or_empty_means_no_filter() {
        assert!(importer_filter(None).unwrap().is_none());
        assert!(importer_filter(Some("")).unwrap().is_none());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_importer_filter_valid_email() {
        let filter = importer_filter(Some("importer@example.com")).unwrap();
        assert_eq!(filter.unwrap().as_str(), "importer@example.com");
    }

    #[test]
    fn test_importer_filter_malformed_email_is_bad_request() {
        assert!(matches!(
            importer_filter(Some("not-an-email")),
            Err(AppError::BadRequest(_))
        ));
    }
}
