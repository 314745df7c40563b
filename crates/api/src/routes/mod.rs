//! Route definitions.

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                  list view (GET)
/// /events/table            partial-refresh payload (GET)
/// /events/bulk             bulk actions (GET for links, POST for forms)
/// /events/preferences      rows-per-page preference (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/events", events::router())
}
