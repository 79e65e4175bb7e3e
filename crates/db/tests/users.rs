//! Integration tests for user CRUD and the failed-login lockout.

use chrono::{Duration, Utc};
use furnicraft_core::lockout::LockoutPolicy;
use furnicraft_db::models::user::{CreateUser, UpdateUser, User};
use furnicraft_db::repositories::UserRepo;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$v=19$placeholder".to_string(),
            role: "customer".to_string(),
            first_name: None,
            last_name: None,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_login_matches_username_or_email(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;

    let by_name = UserRepo::find_by_login(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    let by_email = UserRepo::find_by_login(&pool, "ALICE@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);

    assert!(UserRepo::find_by_login(&pool, "bob").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_violates_unique(pool: PgPool) {
    seed_user(&pool, "alice").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: "customer".to_string(),
            first_name: None,
            last_name: None,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fifth_failure_locks_account(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let policy = LockoutPolicy::default();
    let now = Utc::now();

    for expected in 1..=4 {
        let state = UserRepo::register_failed_login(&pool, user.id, &policy, now)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(state.attempts, expected);
        assert!(!state.is_locked(now));
    }

    let state = UserRepo::register_failed_login(&pool, user.id, &policy, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.attempts, 5);
    assert!(state.is_locked(now));

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.login_attempts, 5);
    let until = stored.lock_until.unwrap();
    let expected = now + Duration::hours(2);
    assert!((until - expected).num_milliseconds().abs() < 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failure_after_expired_lock_restarts_count(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let policy = LockoutPolicy::default();
    let now = Utc::now();
    for _ in 0..5 {
        UserRepo::register_failed_login(&pool, user.id, &policy, now)
            .await
            .unwrap();
    }

    let later = now + Duration::hours(3);
    let state = UserRepo::register_failed_login(&pool, user.id, &policy, later)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.attempts, 1);
    assert_eq!(state.lock_until, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_successful_login_resets_counter(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let policy = LockoutPolicy::default();
    let now = Utc::now();
    for _ in 0..3 {
        UserRepo::register_failed_login(&pool, user.id, &policy, now)
            .await
            .unwrap();
    }

    UserRepo::record_successful_login(&pool, user.id, now)
        .await
        .unwrap();

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.login_attempts, 0);
    assert_eq!(stored.lock_until, None);
    assert!(stored.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_failure_for_missing_user(pool: PgPool) {
    let result = UserRepo::register_failed_login(
        &pool,
        uuid::Uuid::new_v4(),
        &LockoutPolicy::default(),
        Utc::now(),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            role: Some("staff".to_string()),
            first_name: Some("Alice".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.role, "staff");
    assert_eq!(updated.first_name.as_deref(), Some("Alice"));
    assert_eq!(updated.username, "alice");

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
}
