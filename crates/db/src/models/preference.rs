//! Per-user screen preference model.

use eventlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Rows-per-page preference for the event listing screen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScreenPreference {
    pub user_id: DbId,
    pub events_per_page: i32,
    pub updated_at: Timestamp,
}
