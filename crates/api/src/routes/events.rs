//! Route definitions for the `/events` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Absolute path of the listing screen; the safe default redirect target.
pub const EVENTS_PATH: &str = "/api/v1/events";

/// Absolute path of the bulk-action endpoint, used when building row
/// action and undo links.
pub const EVENTS_BULK_PATH: &str = "/api/v1/events/bulk";

/// Routes mounted at `/events`.
///
/// ```text
/// GET  /              -> list_events        (full view state)
/// GET  /table         -> fetch_table        (partial-refresh payload)
/// GET  /bulk          -> bulk_action        (row action / undo links)
/// POST /bulk          -> bulk_action        (bulk form submits)
/// PUT  /preferences   -> update_preferences
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events))
        .route("/table", get(events::fetch_table))
        .route("/bulk", get(events::bulk_action).post(events::bulk_action))
        .route("/preferences", put(events::update_preferences))
}
