use crate::{
    error::Result,
    model::{NewUser, User, UserChanges},
    validation,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// CRUD operations on the `users` table. Every write is a single statement
/// and commits on its own.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub(super) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        debug!(id, "Fetching user");
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }

    /// All users in insertion order.
    pub async fn list(&self) -> Result<Vec<User>> {
        debug!("Fetching all users");
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at, updated_at FROM users ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(users)
    }

    /// Insert a user. Values are stored exactly as given.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, created_at, updated_at) VALUES (?, ?, ?, ?) \
             RETURNING id, username, email, created_at, updated_at",
        )
        .bind(new_user.username.as_str())
        .bind(new_user.email.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        info!(id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    /// Apply the supplied fields and refresh `updated_at`, never moving it
    /// before `created_at`.
    ///
    /// Returns `None` when no user has this id.
    pub async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>> {
        validation::validate_user_changes(changes)?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET \
                username = COALESCE(?, username), \
                email = COALESCE(?, email), \
                updated_at = MAX(?, created_at) \
             WHERE id = ? \
             RETURNING id, username, email, created_at, updated_at",
        )
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match &user {
            Some(_) => info!(id, "Updated user"),
            None => debug!(id, "Update skipped, user not found"),
        }
        Ok(user)
    }

    /// Hard delete. Posts owned by the user are left untouched.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(id, "Deleted user");
        }
        Ok(deleted)
    }
}
