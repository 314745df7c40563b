//! Repository for the `events` table.
//!
//! Listing queries join the externally-owned `users` table to resolve the
//! acting user's login. The WHERE clause is built once per request from a
//! validated [`QuerySpec`] and shared by `count` and `fetch_page`; dynamic
//! identifiers (sort column, direction) only ever come from the allow-list
//! enums in `eventlog_core::listing`, never from raw input. Values are
//! always bound, never interpolated.

use sqlx::PgPool;

use eventlog_core::listing::{escape_like, QuerySpec, StatusFilter};
use eventlog_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventWithUser};

/// Column list for joined listing queries.
const LIST_COLUMNS: &str = "e.id, e.user_id, e.occurred_at, e.event_name, e.status, u.user_login";

/// Column list for bare `events` rows.
const EVENT_COLUMNS: &str = "id, user_id, occurred_at, event_name, status";

/// Shared FROM clause for listing queries.
const FROM_JOINED: &str = "FROM events e LEFT JOIN users u ON u.id = e.user_id";

/// Provides read and mutation operations for events.
pub struct EventRepo;

impl EventRepo {
    // -----------------------------------------------------------------------
    // Listing reads
    // -----------------------------------------------------------------------

    /// Count rows matching the spec's filters, ignoring pagination.
    pub async fn count(pool: &PgPool, spec: &QuerySpec) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_filter(spec);
        let query = format!("SELECT COUNT(*)::BIGINT {FROM_JOINED} {where_clause}");

        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Fetch one page of rows matching the spec, ordered and offset per the
    /// spec's pagination fields.
    ///
    /// `e.id` breaks ties so pages stay stable when many events share a
    /// timestamp.
    pub async fn fetch_page(
        pool: &PgPool,
        spec: &QuerySpec,
    ) -> Result<Vec<EventWithUser>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_filter(spec);

        let query = format!(
            "SELECT {LIST_COLUMNS} {FROM_JOINED} {where_clause} \
             ORDER BY {} {}, e.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            spec.order_by.sql_identifier(),
            spec.order.sql_keyword(),
            bind_idx + 1
        );

        let q = bind_filter_values(sqlx::query_as::<_, EventWithUser>(&query), &bind_values);
        q.bind(spec.per_page).bind(spec.offset()).fetch_all(pool).await
    }

    /// Count rows in a status bucket, independent of any other filter.
    ///
    /// `None` counts every row regardless of status. Drives the status tabs
    /// and the "clear exhausted trash filter" redirect rule.
    pub async fn count_by_status(
        pool: &PgPool,
        status: Option<StatusFilter>,
    ) -> Result<i64, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM events WHERE status = $1",
                )
                .bind(status.as_str())
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM events")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    // -----------------------------------------------------------------------
    // Filter dropdown options
    // -----------------------------------------------------------------------

    /// Distinct login names appearing in the event log, for the user
    /// filter dropdown.
    pub async fn distinct_user_logins(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT u.user_login \
             FROM events e LEFT JOIN users u ON u.id = e.user_id \
             WHERE u.user_login IS NOT NULL \
             ORDER BY u.user_login ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Distinct event names, for the event filter dropdown.
    pub async fn distinct_event_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT event_name FROM events ORDER BY event_name ASC",
        )
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Mutations (one atomic statement per row)
    // -----------------------------------------------------------------------

    /// Move a row into the given status bucket.
    ///
    /// Returns the number of rows changed: 0 when the row is missing or
    /// already carries the target status, so repeating a transition is a
    /// harmless no-op and counters only reflect confirmed mutations.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: StatusFilter,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE events SET status = $2 WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Permanently remove a row. Returns 0 if the row was already gone.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Insert
    // -----------------------------------------------------------------------

    /// Insert a new event, returning the created row.
    ///
    /// New events always start `published` (the column default).
    pub async fn insert(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (user_id, occurred_at, event_name) \
             VALUES ($1, COALESCE($2, NOW()), $3) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.user_id)
            .bind(input.occurred_at)
            .bind(&input.event_name)
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Build a WHERE clause and bind values from a validated spec.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// filters on status, so it is never empty. Every bind value here is text;
/// the search patterns are LIKE-escaped before the wildcards are added.
fn build_filter(spec: &QuerySpec) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<String> = Vec::new();

    conditions.push(format!("e.status = ${bind_idx}"));
    bind_idx += 1;
    bind_values.push(spec.status.as_str().to_string());

    if let Some(ref search) = spec.search {
        let pattern = format!("%{}%", escape_like(search));
        conditions.push(format!(
            "(e.event_name ILIKE ${bind_idx} OR u.user_login ILIKE ${})",
            bind_idx + 1
        ));
        bind_idx += 2;
        bind_values.push(pattern.clone());
        bind_values.push(pattern);
    }

    if let Some(ref user_login) = spec.user_filter {
        conditions.push(format!("u.user_login = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(user_login.clone());
    }

    if let Some(ref event_name) = spec.event_filter {
        conditions.push(format!("e.event_name = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(event_name.clone());
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Bind filter values to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [String],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        q = q.bind(val.as_str());
    }
    q
}

/// Bind filter values to a sqlx `QueryScalar`.
fn bind_filter_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [String],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        q = q.bind(val.as_str());
    }
    q
}
