//! Integration tests for user accounts and roles.

use assert_matches::assert_matches;
use bely_db::models::user::{CreateUser, UpdateProfile};
use bely_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

fn account(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role_id: 2,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn username_lookup_ignores_case(pool: PgPool) {
    let created = UserRepo::create(&pool, &account("Anna", "anna@example.com"))
        .await
        .unwrap();

    let found = UserRepo::find_by_username(&pool, "aNNa").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.username, "Anna");
}

#[sqlx::test(migrations = "./migrations")]
async fn case_variant_username_is_a_duplicate(pool: PgPool) {
    UserRepo::create(&pool, &account("anna", "anna@example.com"))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &account("ANNA", "other@example.com"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_users_username")
    );

    let err = UserRepo::create(&pool, &account("boris", "Anna@Example.com"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_users_email")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn profile_update_keeps_omitted_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &account("anna", "anna@example.com"))
        .await
        .unwrap();

    let updated = UserRepo::update_profile(
        &pool,
        user.id,
        &UpdateProfile {
            first_name: Some("Anna".to_string()),
            bio: Some("Weaver".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.full_name(), "Anna");
    assert_eq!(updated.bio, "Weaver");
    assert_eq!(updated.email, "anna@example.com");
    assert!(updated.avatar_path.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn deactivate_is_idempotent(pool: PgPool) {
    let user = UserRepo::create(&pool, &account("anna", "anna@example.com"))
        .await
        .unwrap();

    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());
    assert!(!UserRepo::deactivate(&pool, user.id).await.unwrap());
    assert!(!UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap().is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn seeded_roles_resolve(pool: PgPool) {
    assert_eq!(RoleRepo::resolve_name(&pool, 1).await.unwrap(), "admin");
    assert_eq!(RoleRepo::resolve_name(&pool, 2).await.unwrap(), "user");
    assert_eq!(RoleRepo::resolve_name(&pool, 99).await.unwrap(), "unknown");
}
