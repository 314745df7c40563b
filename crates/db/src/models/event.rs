//! Event record models and DTOs.
//!
//! Events are append-only apart from their `status` column: `occurred_at`
//! and `event_name` never change after insert, `status` flips between
//! `published` and `trashed`, and a permanent delete removes the row.

use eventlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bare event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub user_id: DbId,
    pub occurred_at: Timestamp,
    pub event_name: String,
    pub status: String,
}

/// An event row joined with the acting user's login name.
///
/// `user_login` is `None` when the identity row no longer exists; the join
/// is LEFT OUTER because the identity table is owned elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub occurred_at: Timestamp,
    pub event_name: String,
    pub status: String,
    pub user_login: Option<String>,
}

/// DTO for inserting a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub user_id: DbId,
    /// Defaults to the insert time when `None`.
    pub occurred_at: Option<Timestamp>,
    pub event_name: String,
}
