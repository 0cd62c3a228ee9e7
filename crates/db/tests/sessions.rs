//! Integration tests for refresh-token session storage.

use bely_db::models::session::CreateSession;
use bely_db::models::user::CreateUser;
use bely_db::repositories::{SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn new_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: "anna".to_string(),
            email: "anna@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id: 2,
        },
    )
    .await
    .unwrap()
    .id
}

fn session(user_id: i64, hash: &str, valid_for: Duration) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: hash.to_string(),
        expires_at: Utc::now() + valid_for,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn rotate_swaps_the_live_session(pool: PgPool) {
    let user = new_user(&pool).await;
    let old = SessionRepo::create(&pool, &session(user, "hash-a", Duration::days(7)))
        .await
        .unwrap();

    let new = SessionRepo::rotate(&pool, old.id, &session(user, "hash-b", Duration::days(7)))
        .await
        .unwrap()
        .expect("live session should rotate");
    assert_eq!(new.user_id, user);

    assert!(SessionRepo::find_active_by_hash(&pool, "hash-a").await.unwrap().is_none());
    assert!(SessionRepo::find_active_by_hash(&pool, "hash-b").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn rotating_a_revoked_session_stores_nothing(pool: PgPool) {
    let user = new_user(&pool).await;
    let old = SessionRepo::create(&pool, &session(user, "hash-a", Duration::days(7)))
        .await
        .unwrap();
    SessionRepo::rotate(&pool, old.id, &session(user, "hash-b", Duration::days(7)))
        .await
        .unwrap();

    let replay = SessionRepo::rotate(&pool, old.id, &session(user, "hash-c", Duration::days(7)))
        .await
        .unwrap();
    assert!(replay.is_none());
    assert!(SessionRepo::find_active_by_hash(&pool, "hash-c").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_sessions_are_invisible_and_purged(pool: PgPool) {
    let user = new_user(&pool).await;
    SessionRepo::create(&pool, &session(user, "stale", Duration::minutes(-5)))
        .await
        .unwrap();
    SessionRepo::create(&pool, &session(user, "live", Duration::days(1)))
        .await
        .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "stale").await.unwrap().is_none());

    let purged = SessionRepo::purge_dead_for_user(&pool, user).await.unwrap();
    assert_eq!(purged, 1);
    assert!(SessionRepo::find_active_by_hash(&pool, "live").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn revoke_all_counts_live_sessions(pool: PgPool) {
    let user = new_user(&pool).await;
    for hash in ["one", "two"] {
        SessionRepo::create(&pool, &session(user, hash, Duration::days(1)))
            .await
            .unwrap();
    }

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user).await.unwrap(), 2);
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user).await.unwrap(), 0);
}
