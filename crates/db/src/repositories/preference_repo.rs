//! Repository for the `screen_preferences` table.

use sqlx::PgPool;

use eventlog_core::types::DbId;

use crate::models::preference::ScreenPreference;

const COLUMNS: &str = "user_id, events_per_page, updated_at";

/// Provides per-user screen preference lookups.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// The user's rows-per-page preference, or `None` to use the
    /// configured default.
    pub async fn events_per_page(pool: &PgPool, user_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "SELECT events_per_page FROM screen_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Upsert the user's rows-per-page preference.
    pub async fn set_events_per_page(
        pool: &PgPool,
        user_id: DbId,
        per_page: i32,
    ) -> Result<ScreenPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO screen_preferences (user_id, events_per_page) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET events_per_page = $2, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScreenPreference>(&query)
            .bind(user_id)
            .bind(per_page)
            .fetch_one(pool)
            .await
    }
}
