//! Repository for the `users` table.

use furnicraft_core::lockout::{LockoutPolicy, LoginLockout};
use furnicraft_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, first_name, last_name, \
                        is_active, login_attempts, lock_until, last_login_at, \
                        created_at, updated_at";

/// Provides CRUD operations and login bookkeeping for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by login identifier: an exact username or an email.
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE username = $1 OR LOWER(email) = LOWER($1)
             ORDER BY (username = $1) DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by most recently created first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                first_name = COALESCE($6, first_name),
                last_name = COALESCE($7, last_name),
                is_active = COALESCE($8, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply one failed login to the user's lockout counter.
    ///
    /// The row is locked for the read-modify-write, so concurrent failures
    /// each count. Returns the new lockout state, or `None` if the user does
    /// not exist.
    pub async fn register_failed_login(
        pool: &PgPool,
        id: DbId,
        policy: &LockoutPolicy,
        now: Timestamp,
    ) -> Result<Option<LoginLockout>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(i32, Option<Timestamp>)> = sqlx::query_as(
            "SELECT login_attempts, lock_until FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((attempts, lock_until)) = current else {
            return Ok(None);
        };

        let next = LoginLockout {
            attempts,
            lock_until,
        }
        .register_failure(policy, now);

        sqlx::query("UPDATE users SET login_attempts = $2, lock_until = $3 WHERE id = $1")
            .bind(id)
            .bind(next.attempts)
            .bind(next.lock_until)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(next))
    }

    /// Record a successful login: reset the lockout counter, clear `lock_until`,
    /// and set `last_login_at`.
    pub async fn record_successful_login(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        let reset = LoginLockout::reset();
        sqlx::query(
            "UPDATE users SET
                login_attempts = $2,
                lock_until = $3,
                last_login_at = $4
             WHERE id = $1",
        )
        .bind(id)
        .bind(reset.attempts)
        .bind(reset.lock_until)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(())
    }
}
