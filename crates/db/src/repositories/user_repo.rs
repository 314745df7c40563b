//! Repository for the `users` table.
//!
//! Read-mostly: the identity service owns this table. `create` exists for
//! tests and local bootstrap.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_login, role, created_at";

/// Provides lookups against the identity table.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (user_login, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.user_login)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by login name (case-sensitive).
    pub async fn find_by_login(pool: &PgPool, user_login: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_login = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_login)
            .fetch_optional(pool)
            .await
    }
}
