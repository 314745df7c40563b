//! View-state assembly for the event listing screen.
//!
//! Combines the page of rows, the bucket counts, and the active
//! [`QuerySpec`] into the structure a client renders: column headers with
//! active-sort indication, rows with their action links, status tabs,
//! filter dropdown descriptors, a pagination descriptor, and the optional
//! search subtitle and bulk-result notice.
//!
//! Columns are an explicit descriptor list validated against the same
//! allow-list the sort order uses; there is no render-by-column-name
//! dispatch anywhere.

use serde::Serialize;

use eventlog_core::listing::{QuerySpec, SortColumn, SortOrder, StatusFilter};
use eventlog_core::types::{DbId, Timestamp};
use eventlog_db::models::event::EventWithUser;

use crate::routes::events::{EVENTS_BULK_PATH, EVENTS_PATH};

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One table column. `sorted` carries the active direction when this column
/// drives the current ordering; `next_order` is the direction a click on
/// the header should request.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub sorted: Option<&'static str>,
    pub next_order: Option<&'static str>,
}

/// A single row plus its row-scoped action links.
#[derive(Debug, Clone, Serialize)]
pub struct EventRowView {
    pub id: DbId,
    pub occurred_at: Timestamp,
    /// Human-readable timestamp, e.g. `Mon, Jan 5, 2026 @ 3:04 pm`.
    pub date_label: String,
    pub event_name: String,
    pub user_login: Option<String>,
    pub actions: Vec<RowAction>,
}

/// A row action link. The URL carries the record id and an action token
/// scoped to the bulk-events action class.
#[derive(Debug, Clone, Serialize)]
pub struct RowAction {
    pub name: &'static str,
    pub label: &'static str,
    pub url: String,
}

/// A status tab ("view") with its live count.
#[derive(Debug, Clone, Serialize)]
pub struct StatusTab {
    pub status: &'static str,
    pub label: &'static str,
    pub count: i64,
    pub current: bool,
    pub url: String,
}

/// A filter dropdown. Absent entirely when fewer than two options exist.
#[derive(Debug, Clone, Serialize)]
pub struct FilterControl {
    pub options: Vec<String>,
    pub selected: Option<String>,
}

/// A bulk action the current status view offers.
#[derive(Debug, Clone, Serialize)]
pub struct BulkActionOption {
    pub action: &'static str,
    pub label: &'static str,
}

/// Pagination metadata for one nav bar.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationView {
    pub current_page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub total_items_label: String,
    pub item_range_label: String,
}

/// Top and bottom nav bar slots for the partial-refresh payload.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationSlots {
    pub top: PaginationView,
    pub bottom: PaginationView,
}

/// Bulk-action result notice, assembled from redirect counters.
#[derive(Debug, Clone, Serialize)]
pub struct BulkNotice {
    pub trashed: i64,
    pub untrashed: i64,
    pub deleted: i64,
    /// Restores exactly the just-trashed ids when followed.
    pub undo_url: Option<String>,
}

/// The full listing view.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    /// Whether the client should render the bulk-select checkbox column.
    pub selectable: bool,
    pub rows: Vec<EventRowView>,
    pub views: Vec<StatusTab>,
    pub filter_users: Option<FilterControl>,
    pub filter_events: Option<FilterControl>,
    pub bulk_actions: Vec<BulkActionOption>,
    pub pagination: PaginationView,
    pub search_subtitle: Option<String>,
    pub notice: Option<BulkNotice>,
}

/// The partial-refresh payload: just the table region.
#[derive(Debug, Clone, Serialize)]
pub struct TablePayload {
    pub rows: Vec<EventRowView>,
    pub column_headers: Vec<ColumnHeader>,
    pub pagination: PaginationSlots,
    pub total_items_label: String,
    pub total_pages: i64,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Column descriptors with active-sort indication for the current spec.
pub fn column_headers(spec: &QuerySpec) -> Vec<ColumnHeader> {
    const LABELS: &[(SortColumn, &str)] = &[
        (SortColumn::Date, "Date"),
        (SortColumn::UserLogin, "User"),
        (SortColumn::Event, "Event"),
    ];

    LABELS
        .iter()
        .map(|&(column, label)| {
            let active = spec.order_by == column;
            ColumnHeader {
                key: column.as_param(),
                label,
                sortable: true,
                sorted: active.then(|| spec.order.as_param()),
                next_order: Some(if active {
                    spec.order.reversed().as_param()
                } else {
                    SortOrder::Asc.as_param()
                }),
            }
        })
        .collect()
}

/// Row views with their trash action links.
pub fn row_views(rows: &[EventWithUser], token: &str) -> Vec<EventRowView> {
    rows.iter()
        .map(|row| EventRowView {
            id: row.id,
            occurred_at: row.occurred_at,
            date_label: row
                .occurred_at
                .format("%a, %b %-d, %Y @ %-I:%M %P")
                .to_string(),
            event_name: row.event_name.clone(),
            user_login: row.user_login.clone(),
            actions: vec![RowAction {
                name: "trash",
                label: "Trash",
                url: format!("{EVENTS_BULK_PATH}?action=trash&event_ids={}&_token={token}", row.id),
            }],
        })
        .collect()
}

/// Status tabs. The published bucket is always offered; the trashed bucket
/// is hidden entirely while empty.
pub fn status_tabs(spec: &QuerySpec, published: i64, trashed: i64) -> Vec<StatusTab> {
    let mut tabs = vec![StatusTab {
        status: StatusFilter::Published.as_str(),
        label: "All",
        count: published,
        current: spec.status == StatusFilter::Published,
        url: EVENTS_PATH.to_string(),
    }];

    if trashed > 0 {
        tabs.push(StatusTab {
            status: StatusFilter::Trashed.as_str(),
            label: "Trashed",
            count: trashed,
            current: spec.status == StatusFilter::Trashed,
            url: format!("{EVENTS_PATH}?status={}", StatusFilter::Trashed.as_str()),
        });
    }

    tabs
}

/// A dropdown descriptor, or `None` when there is nothing to choose
/// between (zero or one option).
pub fn filter_control(options: Vec<String>, selected: Option<&str>) -> Option<FilterControl> {
    if options.len() < 2 {
        return None;
    }
    Some(FilterControl {
        options,
        selected: selected.map(str::to_string),
    })
}

/// Bulk actions offered for the current status view: trashing from the
/// published view; restore and permanent delete from the trashed view.
pub fn bulk_actions(status: StatusFilter) -> Vec<BulkActionOption> {
    match status {
        StatusFilter::Published => vec![BulkActionOption {
            action: "trash",
            label: "Move to Trash",
        }],
        StatusFilter::Trashed => vec![
            BulkActionOption {
                action: "untrash",
                label: "Restore",
            },
            BulkActionOption {
                action: "delete",
                label: "Delete permanently",
            },
        ],
    }
}

/// Pagination descriptor for the current page.
pub fn pagination(spec: &QuerySpec, total_items: i64) -> PaginationView {
    let total_pages = if total_items == 0 {
        0
    } else {
        (total_items + spec.per_page - 1) / spec.per_page
    };

    let start = if total_items == 0 {
        0
    } else {
        (spec.offset() + 1).min(total_items)
    };
    let end = (spec.offset() + spec.per_page).min(total_items);

    let total_items_label = if total_items == 1 {
        "1 item".to_string()
    } else {
        format!("{total_items} items")
    };

    PaginationView {
        current_page: spec.page,
        per_page: spec.per_page,
        total_items,
        total_pages,
        total_items_label,
        item_range_label: format!("{start}-{end} of {total_items}"),
    }
}

/// Subtitle shown while a search is active.
pub fn search_subtitle(spec: &QuerySpec) -> Option<String> {
    spec.search
        .as_deref()
        .map(|s| format!("Search results for: {s}"))
}

/// Bulk-result notice from redirect counters. The undo link re-invokes
/// `untrash` on exactly the ids the preceding request trashed.
pub fn bulk_notice(
    trashed: i64,
    untrashed: i64,
    deleted: i64,
    undo_ids: &[DbId],
    token: &str,
) -> Option<BulkNotice> {
    if trashed == 0 && untrashed == 0 && deleted == 0 {
        return None;
    }

    let undo_url = (trashed > 0 && !undo_ids.is_empty()).then(|| {
        let ids = undo_ids
            .iter()
            .map(|id| format!("event_ids={id}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{EVENTS_BULK_PATH}?action=untrash&{ids}&_token={token}")
    });

    Some(BulkNotice {
        trashed,
        untrashed,
        deleted,
        undo_url,
    })
}

/// The partial-refresh payload. Both nav slots carry the same descriptor;
/// the split lets a patching client address the two bars independently.
pub fn table_payload(spec: &QuerySpec, rows: &[EventWithUser], total: i64, token: &str) -> TablePayload {
    let pagination_view = pagination(spec, total);
    TablePayload {
        rows: row_views(rows, token),
        column_headers: column_headers(spec),
        total_items_label: pagination_view.total_items_label.clone(),
        total_pages: pagination_view.total_pages,
        pagination: PaginationSlots {
            top: pagination_view.clone(),
            bottom: pagination_view,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
