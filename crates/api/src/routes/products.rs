//! Product route handlers.
//!
//! Every handler is a thin pass-through: parse the path/body, run one
//! repository call, serialize the raw result. There is no schema validation
//! on product bodies; clients own the document shape.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use ihub_core::{Email, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// `GET /products` - every product, unfiltered and unpaginated.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - single product document.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id = ProductId::parse(&id)?;

    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// `GET /products/supplier/{email}` - products filtered by exact supplier
/// email. Any authenticated caller may list any supplier's products.
pub async fn by_supplier(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Path(email): Path<String>,
) -> Result<Json<Vec<Value>>> {
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let products = ProductRepository::new(state.pool())
        .list_by_supplier(&email)
        .await?;

    Ok(Json(products))
}

/// `GET /latest-products` - the 6 most recent products by `import_date`.
pub async fn latest(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let products = ProductRepository::new(state.pool()).latest().await?;
    Ok(Json(products))
}

/// `GET /search/{name}` - case-insensitive substring match on
/// `product_name`. No match is an empty array, not an error.
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Value>>> {
    let products = ProductRepository::new(state.pool())
        .search_by_name(&name)
        .await?;

    Ok(Json(products))
}

/// `POST /products` - insert the request body verbatim as a new product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    require_object(&body)?;

    let created = ProductRepository::new(state.pool()).create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /products/{id}` - merge the provided top-level fields into the
/// stored document.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let id = ProductId::parse(&id)?;
    require_object(&body)?;

    let updated = ProductRepository::new(state.pool())
        .update(id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(updated))
}

/// `DELETE /products/{id}` - remove a product. Deleting a well-formed but
/// absent identifier reports zero documents affected, which is success.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(_principal): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = ProductId::parse(&id)?;

    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted_count": deleted })))
}

/// Document bodies must be JSON objects; arrays and scalars cannot be
/// stored as documents.
pub(crate) fn require_object(body: &Value) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "request body must be a JSON object".to_string(),
        ))
    }
}
