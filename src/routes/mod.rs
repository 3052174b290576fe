use axum::Router;

use crate::state::AppState;

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod sizes;
pub mod stores;
pub mod webhook;

// Build the API router without binding state; it will be provided at the top level.
// The static "/stores" and "/webhook" segments win over the "/{store_id}" capture.
pub fn create_api_router() -> Router<AppState> {
    let store_scoped = Router::new()
        .nest("/billboards", billboards::router())
        .nest("/categories", categories::router())
        .nest("/sizes", sizes::router())
        .nest("/colors", colors::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router());

    Router::new()
        .nest("/stores", stores::router())
        .nest("/webhook", webhook::router())
        .nest("/{store_id}", store_scoped)
}
