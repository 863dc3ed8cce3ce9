//! SQLite-backed storage layer.
//!
//! A [`Store`] owns the connection pool and is created once at startup. It is
//! cheap to clone and is handed to the GraphQL schema as context data, so
//! every request borrows the same pool instead of reaching for a global.
//!
//! ## Tables
//!
//! ```sql
//! users (id, username, email, created_at, updated_at)
//! posts (id, title, content, user_id, created_at, updated_at)
//! ```
//!
//! Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT` and are never reused.
//! `posts.user_id` carries no foreign key: deleting a user leaves its posts in
//! place, and a post may reference a user that never existed.
//!
//! ## Components
//!
//! - [`Store`]: pool handle and table bootstrap
//! - [`UserRepository`]: CRUD operations for users
//! - [`PostRepository`]: CRUD operations for posts

mod post_repository;
mod schema;
mod user_repository;

pub use post_repository::PostRepository;
pub use user_repository::UserRepository;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open a pool for `url`, creating the database file if needed.
    ///
    /// In-memory URLs get a single long-lived connection so that every
    /// statement sees the same database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect_with(options)
                .await?
        };

        tracing::info!(url, "Connected to database");
        Ok(Self { pool })
    }

    /// A fresh in-memory store with tables already created.
    pub async fn in_memory() -> Result<Self> {
        let store = Self::connect("sqlite::memory:").await?;
        store.init_schema().await?;
        Ok(store)
    }

    /// Create tables and indexes that do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in schema::STATEMENTS {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        tracing::info!("Database tables ready");
        Ok(())
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    pub fn posts(&self) -> PostRepository<'_> {
        PostRepository::new(&self.pool)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
