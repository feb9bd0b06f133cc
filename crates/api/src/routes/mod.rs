//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness (static ok)
//! GET    /health/ready                - Readiness (checks the store)
//!
//! # Products
//! GET    /products                    - List all products          (public)
//! POST   /products                    - Create a product           (auth)
//! GET    /products/{id}               - Single product by id       (public)
//! PUT    /products/{id}               - Merge-update fields        (auth)
//! DELETE /products/{id}               - Delete by id               (auth)
//! GET    /products/supplier/{email}   - List by supplier email     (auth)
//! GET    /latest-products             - 6 newest by import_date    (public)
//! GET    /search/{name}               - Substring name search      (public)
//!
//! # Imports
//! POST   /imports                     - Record import + decrement  (auth)
//! GET    /imports?email=              - List imports               (auth)
//! DELETE /imports/{id}                - Delete by id               (auth)
//! ```
//!
//! Authorization policy is declarative and uniform: product reads are
//! public, all mutations and the supplier/importer listings require a
//! verified bearer token. By-id lookup returns a single object (404 when
//! absent); that is the contract, the historical array variant is gone.

pub mod imports;
pub mod products;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/supplier/{email}", get(products::by_supplier))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/latest-products", get(products::latest))
        .route("/search/{name}", get(products::search))
}

/// Create the import routes router.
pub fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/imports", get(imports::index).post(imports::create))
        .route("/imports/{id}", delete(imports::destroy))
}

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(product_routes()).merge(import_routes())
}
