//! Route definitions for the PC catalog
//!
//! This module configures all HTTP routes and maps them to their handlers.
//! It also defines the application state shared by every handler.

use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;

use crate::database::Store;
use crate::handler::{api_not_found, create_pc, delete_pc, list_pcs, reject_empty_id, serve_static};
use crate::static_files::StaticFiles;

/// Application state shared across all request handlers
///
/// Holds no per-request data: the store hands out a fresh connection for
/// each operation and the static root is read-only.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub assets: Arc<StaticFiles>,
}

impl AppState {
    pub fn new(store: Store, assets: StaticFiles) -> Self {
        Self {
            store,
            assets: Arc::new(assets),
        }
    }
}

/// Creates the application router
///
/// # Route Definitions
///
/// - `GET /api/pcs` - Lists records, newest first
/// - `POST /api/pcs` - Creates a record
/// - `DELETE /api/pcs/{id}` - Deletes a record
/// - anything else under `/api` - 404 `{"message": "Not found"}`
/// - `GET /*` - Static front-end (`/` serves `index.html`)
///
/// # Example Usage
///
/// ```no_run
/// # use pc_catalog::database::Store;
/// # use pc_catalog::static_files::StaticFiles;
/// # use pc_catalog::route::{create_app, AppState};
/// let store = Store::open("data/pc_catalog.db").unwrap();
/// let assets = StaticFiles::new("public").unwrap();
/// let app = create_app(AppState::new(store, assets));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/pcs", get(list_pcs).post(create_pc).fallback(api_not_found))
        .route("/pcs/", delete(reject_empty_id).fallback(api_not_found))
        .route("/pcs/{id}", delete(delete_pc).fallback(api_not_found))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .fallback(serve_static)
        .with_state(state)
}
