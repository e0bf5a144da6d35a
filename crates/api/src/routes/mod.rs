pub mod health;
pub mod ux;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // UX generation, search, and catalog reads.
        .nest("/ux", ux::router())
}
