//! Handlers for the `/events` listing screen.
//!
//! Three surfaces share one pipeline: the full list view, the
//! partial-refresh table payload, and the bulk-action processor. Raw
//! parameters pass through `eventlog_core::listing` before anything touches
//! the database, and every state-changing request ends in a redirect.

use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap};
use axum::response::Redirect;
use axum::Json;
use serde::Deserialize;

use eventlog_core::error::CoreError;
use eventlog_core::listing::{clamp_per_page, QuerySpec, RawListRequest, StatusFilter};
use eventlog_core::nonce::{self, BULK_EVENTS_ACTION};
use eventlog_core::roles::can_edit_events;
use eventlog_core::types::DbId;
use eventlog_db::models::preference::ScreenPreference;
use eventlog_db::repositories::{EventRepo, PreferenceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireEditor, RequireViewer};
use crate::params::RequestParams;
use crate::response::DataResponse;
use crate::routes::events::EVENTS_PATH;
use crate::sendback::{Sendback, TRANSIENT_PARAMS};
use crate::state::AppState;
use crate::view::{self, TablePayload, TableView};

/// Result counters and undo ids carried by a previous redirect; stripped
/// from the next sendback so they never go stale.
const RESULT_PARAMS: &[&str] = &["trashed", "untrashed", "deleted", "event_ids"];

// ---------------------------------------------------------------------------
// Shared pipeline pieces
// ---------------------------------------------------------------------------

/// Map raw request parameters onto the normalizer's input.
fn raw_list_request(params: &RequestParams) -> RawListRequest {
    RawListRequest {
        status: params.first_owned("status"),
        search: params.first_owned("s"),
        user_filter: params.first_owned("filter_user"),
        event_filter: params.first_owned("filter_event"),
        order_by: params.first_owned("orderby"),
        order: params.first_owned("order"),
        page: params.first_owned("paged"),
    }
}

/// Rows-per-page for this user: stored preference, or the configured
/// default. Clamping happens in the spec builder.
async fn resolve_per_page(state: &AppState, user_id: DbId) -> AppResult<i64> {
    let preference = PreferenceRepo::events_per_page(&state.pool, user_id).await?;
    Ok(preference.map(i64::from).unwrap_or(state.config.default_per_page))
}

/// Issue the bulk-events action token for the current user.
fn issue_token(state: &AppState, user_id: DbId) -> String {
    nonce::issue(
        &state.config.nonce_secret,
        BULK_EVENTS_ACTION,
        user_id,
        chrono::Utc::now().timestamp(),
    )
}

/// A result counter from the query string; absent or malformed reads as 0.
fn counter(params: &RequestParams, key: &str) -> i64 {
    params
        .first(key)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Full list view
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// The full listing view: rows for the current page plus everything the
/// screen around the table needs (status tabs, filters, bulk action
/// options, pagination, search subtitle, bulk-result notice).
pub async fn list_events(
    State(state): State<AppState>,
    RequireViewer(user): RequireViewer,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<TableView>>> {
    let params = RequestParams::from_query(query.as_deref());
    let per_page = resolve_per_page(&state, user.user_id).await?;
    let spec = QuerySpec::from_raw(&raw_list_request(&params), per_page);

    let total = EventRepo::count(&state.pool, &spec).await?;
    let rows = EventRepo::fetch_page(&state.pool, &spec).await?;
    let published = EventRepo::count_by_status(&state.pool, Some(StatusFilter::Published)).await?;
    let trashed = EventRepo::count_by_status(&state.pool, Some(StatusFilter::Trashed)).await?;
    let user_options = EventRepo::distinct_user_logins(&state.pool).await?;
    let event_options = EventRepo::distinct_event_names(&state.pool).await?;

    let token = issue_token(&state, user.user_id);

    let table = TableView {
        columns: view::column_headers(&spec),
        selectable: can_edit_events(&user.role),
        rows: view::row_views(&rows, &token),
        views: view::status_tabs(&spec, published, trashed),
        filter_users: view::filter_control(user_options, spec.user_filter.as_deref()),
        filter_events: view::filter_control(event_options, spec.event_filter.as_deref()),
        bulk_actions: view::bulk_actions(spec.status),
        pagination: view::pagination(&spec, total),
        search_subtitle: view::search_subtitle(&spec),
        notice: view::bulk_notice(
            counter(&params, "trashed"),
            counter(&params, "untrashed"),
            counter(&params, "deleted"),
            &params.ids("event_ids"),
            &token,
        ),
    };

    Ok(Json(DataResponse { data: table }))
}

// ---------------------------------------------------------------------------
// Partial refresh
// ---------------------------------------------------------------------------

/// GET /api/v1/events/table
///
/// Partial-refresh mode: the identical pipeline, returning only the table
/// region so the client can patch it in place. Clients trigger this for
/// pagination links, sortable headers, and filter submits; plain text
/// search and bulk submits stay full-page. Clients are expected to
/// debounce typed page-number input (~500ms) and to apply
/// last-response-wins when fetches overlap; the handler itself is
/// stateless.
pub async fn fetch_table(
    State(state): State<AppState>,
    RequireViewer(user): RequireViewer,
    RawQuery(query): RawQuery,
) -> AppResult<Json<TablePayload>> {
    let params = RequestParams::from_query(query.as_deref());
    let per_page = resolve_per_page(&state, user.user_id).await?;
    let spec = QuerySpec::from_raw(&raw_list_request(&params), per_page);

    let total = EventRepo::count(&state.pool, &spec).await?;
    let rows = EventRepo::fetch_page(&state.pool, &spec).await?;
    let token = issue_token(&state, user.user_id);

    Ok(Json(view::table_payload(&spec, &rows, total, &token)))
}

// ---------------------------------------------------------------------------
// Bulk actions
// ---------------------------------------------------------------------------

/// GET|POST /api/v1/events/bulk
///
/// Applies a bulk action to a set of event ids and redirects back to the
/// listing. GET serves row-action and undo links; POST serves the form's
/// top/bottom bulk controls. The processor walks
/// Received -> Validated -> Authorized -> Executing -> Redirecting:
/// a missing action or empty id set redirects silently, an unknown action
/// falls through as a no-op, a bad token is fatal before any mutation, and
/// a store-reported row failure aborts the batch with an operator-facing
/// error (earlier rows stay mutated; there is deliberately no wrapping
/// transaction).
pub async fn bulk_action(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: String,
) -> AppResult<Redirect> {
    let params = RequestParams::parse(query.as_deref(), Some(&body));

    let referer_header = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());

    let mut sendback = Sendback::resolve(
        params.first("_wp_http_referer"),
        referer_header,
        EVENTS_PATH,
    );
    sendback.set("paged", params.first_non_empty("paged").unwrap_or("1"));
    sendback.remove(TRANSIENT_PARAMS);
    sendback.remove(RESULT_PARAMS);

    // Received: both an action and a non-empty id set are required.
    let Some(action) = current_action(&params) else {
        return Ok(Redirect::to(&sendback.into_path_and_query()));
    };
    let ids = params.ids("event_ids");
    if ids.is_empty() {
        return Ok(Redirect::to(&sendback.into_path_and_query()));
    }

    // Validated: unknown actions are a no-op fallthrough.
    if !matches!(action, "trash" | "untrash" | "delete") {
        return Ok(Redirect::to(&sendback.into_path_and_query()));
    }

    // Authorized: the bulk-events token gates every mutation, shared by
    // single-row links and multi-row submits alike.
    let token = params.first("_token").unwrap_or_default();
    let now = chrono::Utc::now().timestamp();
    if !nonce::verify(
        &state.config.nonce_secret,
        BULK_EVENTS_ACTION,
        user.user_id,
        token,
        now,
    ) {
        return Err(AppError::Core(CoreError::Forbidden(
            "The link you followed has expired. Go back and try again.".into(),
        )));
    }

    // Executing: one atomic statement per id, counting confirmed mutations.
    match action {
        "trash" => {
            let mut trashed: u64 = 0;
            for id in &ids {
                trashed += EventRepo::set_status(&state.pool, *id, StatusFilter::Trashed)
                    .await
                    .map_err(|err| {
                        AppError::BulkActionFailed(format!(
                            "Error moving event {id} to the trash: {err}"
                        ))
                    })?;
            }
            tracing::info!(user_id = user.user_id, count = trashed, "Events trashed");

            sendback.set("trashed", &trashed.to_string());
            // The id set rides along so the notice can offer an undo link.
            sendback.append_all("event_ids", &ids);
        }
        "untrash" => {
            let mut untrashed: u64 = 0;
            for id in &ids {
                untrashed += EventRepo::set_status(&state.pool, *id, StatusFilter::Published)
                    .await
                    .map_err(|err| {
                        AppError::BulkActionFailed(format!(
                            "Error restoring event {id} from the trash: {err}"
                        ))
                    })?;
            }
            tracing::info!(user_id = user.user_id, count = untrashed, "Events restored");

            sendback.set("untrashed", &untrashed.to_string());
            clear_exhausted_trash_filter(&state, &mut sendback).await?;
        }
        "delete" => {
            let mut deleted: u64 = 0;
            for id in &ids {
                deleted += EventRepo::delete(&state.pool, *id).await.map_err(|err| {
                    AppError::BulkActionFailed(format!(
                        "Error permanently deleting event {id}: {err}"
                    ))
                })?;
            }
            tracing::info!(user_id = user.user_id, count = deleted, "Events deleted");

            sendback.set("deleted", &deleted.to_string());
            clear_exhausted_trash_filter(&state, &mut sendback).await?;
        }
        _ => unreachable!("validated above"),
    }

    Ok(Redirect::to(&sendback.into_path_and_query()))
}

/// The submitted action name, honoring the duplicate top/bottom controls:
/// `action` wins unless it is absent or the `-1` placeholder, then
/// `action2` is consulted.
fn current_action(params: &RequestParams) -> Option<&str> {
    params
        .first_non_empty("action")
        .filter(|a| *a != "-1")
        .or_else(|| params.first_non_empty("action2").filter(|a| *a != "-1"))
}

/// Drop the `status` param from the sendback once the trashed bucket is
/// empty, so the redirect does not land on a view with nothing in it.
async fn clear_exhausted_trash_filter(
    state: &AppState,
    sendback: &mut Sendback,
) -> AppResult<()> {
    let trashed = EventRepo::count_by_status(&state.pool, Some(StatusFilter::Trashed)).await?;
    if trashed == 0 {
        sendback.remove(&["status"]);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Screen preferences
// ---------------------------------------------------------------------------

/// Body for the preference update.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub per_page: i64,
}

/// PUT /api/v1/events/preferences
///
/// Store the caller's rows-per-page preference for the listing screen.
pub async fn update_preferences(
    State(state): State<AppState>,
    RequireViewer(user): RequireViewer,
    Json(input): Json<UpdatePreference>,
) -> AppResult<Json<DataResponse<ScreenPreference>>> {
    let per_page = clamp_per_page(input.per_page) as i32;
    let preference =
        PreferenceRepo::set_events_per_page(&state.pool, user.user_id, per_page).await?;
    Ok(Json(DataResponse { data: preference }))
}
