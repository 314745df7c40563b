//! Identity row model.
//!
//! The `users` table is owned by the identity service; this crate only
//! reads it (and seeds it in tests).

use eventlog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row as visible to the event log service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub user_login: String,
    /// Role name (`"admin"`, `"editor"`, `"viewer"`).
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for seeding a user (tests and local bootstrap only).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub user_login: String,
    pub role: String,
}
