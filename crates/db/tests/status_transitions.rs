//! Integration tests for status transitions: trash, restore, and
//! permanent delete.
//!
//! Verifies that:
//! - Trash then restore round-trips a set of rows back to `published`
//! - Repeating a transition on an already-transitioned row counts zero
//! - Permanent delete removes the row for good
//! - `count_by_status` tracks the buckets the status tabs display

use sqlx::PgPool;

use eventlog_core::listing::StatusFilter;
use eventlog_db::models::event::CreateEvent;
use eventlog_db::models::user::CreateUser;
use eventlog_db::repositories::{EventRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, login: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            user_login: login.to_string(),
            role: "editor".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_events(pool: &PgPool, user_id: i64, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let event = EventRepo::insert(
            pool,
            &CreateEvent {
                user_id,
                occurred_at: None,
                event_name: format!("event {i}"),
            },
        )
        .await
        .unwrap();
        ids.push(event.id);
    }
    ids
}

// ---------------------------------------------------------------------------
// Test: trash then restore round-trips to published
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trash_untrash_round_trip(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let ids = seed_events(&pool, user, 3).await;

    for id in &ids {
        let changed = EventRepo::set_status(&pool, *id, StatusFilter::Trashed)
            .await
            .unwrap();
        assert_eq!(changed, 1, "trash should change exactly one row");
    }
    assert_eq!(
        EventRepo::count_by_status(&pool, Some(StatusFilter::Trashed))
            .await
            .unwrap(),
        3
    );

    for id in &ids {
        let changed = EventRepo::set_status(&pool, *id, StatusFilter::Published)
            .await
            .unwrap();
        assert_eq!(changed, 1, "restore should change exactly one row");
    }
    assert_eq!(
        EventRepo::count_by_status(&pool, Some(StatusFilter::Published))
            .await
            .unwrap(),
        3,
        "all rows should be published again after the round trip"
    );
    assert_eq!(
        EventRepo::count_by_status(&pool, Some(StatusFilter::Trashed))
            .await
            .unwrap(),
        0
    );
}

// ---------------------------------------------------------------------------
// Test: repeating a transition counts zero
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_transition_counts_zero(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let ids = seed_events(&pool, user, 1).await;
    let id = ids[0];

    // Restoring an already-published row is a harmless no-op.
    let changed = EventRepo::set_status(&pool, id, StatusFilter::Published)
        .await
        .unwrap();
    assert_eq!(changed, 0);

    let first = EventRepo::set_status(&pool, id, StatusFilter::Trashed)
        .await
        .unwrap();
    assert_eq!(first, 1);

    let second = EventRepo::set_status(&pool, id, StatusFilter::Trashed)
        .await
        .unwrap();
    assert_eq!(second, 0, "second trash should report zero rows changed");
}

// ---------------------------------------------------------------------------
// Test: delete is permanent and idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_permanent(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let ids = seed_events(&pool, user, 2).await;

    let deleted = EventRepo::delete(&pool, ids[0]).await.unwrap();
    assert_eq!(deleted, 1);

    assert_eq!(
        EventRepo::count_by_status(&pool, None).await.unwrap(),
        1,
        "deleted row must be gone from every bucket"
    );

    // Deleting again is a no-op, not an error.
    let again = EventRepo::delete(&pool, ids[0]).await.unwrap();
    assert_eq!(again, 0);
}

// ---------------------------------------------------------------------------
// Test: missing id transitions count zero
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_id_counts_zero(pool: PgPool) {
    let changed = EventRepo::set_status(&pool, 123_456, StatusFilter::Trashed)
        .await
        .unwrap();
    assert_eq!(changed, 0);

    let deleted = EventRepo::delete(&pool, 123_456).await.unwrap();
    assert_eq!(deleted, 0);
}
