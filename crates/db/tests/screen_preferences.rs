//! Integration tests for per-user screen preferences.

use sqlx::PgPool;

use eventlog_db::models::user::CreateUser;
use eventlog_db::repositories::{PreferenceRepo, UserRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preference_defaults_to_none(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            user_login: "alice".to_string(),
            role: "viewer".to_string(),
        },
    )
    .await
    .unwrap();

    let pref = PreferenceRepo::events_per_page(&pool, user.id).await.unwrap();
    assert_eq!(pref, None, "no row means the configured default applies");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preference_upsert(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            user_login: "alice".to_string(),
            role: "viewer".to_string(),
        },
    )
    .await
    .unwrap();

    PreferenceRepo::set_events_per_page(&pool, user.id, 50)
        .await
        .unwrap();
    assert_eq!(
        PreferenceRepo::events_per_page(&pool, user.id).await.unwrap(),
        Some(50)
    );

    // Second write updates in place.
    PreferenceRepo::set_events_per_page(&pool, user.id, 100)
        .await
        .unwrap();
    assert_eq!(
        PreferenceRepo::events_per_page(&pool, user.id).await.unwrap(),
        Some(100)
    );
}
