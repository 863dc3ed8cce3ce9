use crate::{
    error::Result,
    model::{NewPost, Post, PostChanges},
    validation,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    pub(super) fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Post>> {
        debug!(id, "Fetching post");
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        debug!("Fetching all posts");
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id, created_at, updated_at FROM posts ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// Posts owned by `user_id`, oldest first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Post>> {
        debug!(user_id, "Fetching posts for user");
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id, created_at, updated_at FROM posts \
             WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// Insert a post. Values and the owner id are stored as given, without
    /// checking that the user exists.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content, user_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, title, content, user_id, created_at, updated_at",
        )
        .bind(new_post.title.as_str())
        .bind(new_post.content.as_str())
        .bind(new_post.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        info!(id = post.id, user_id = post.user_id, title = %post.title, "Created post");
        Ok(post)
    }

    pub async fn update(&self, id: i64, changes: &PostChanges) -> Result<Option<Post>> {
        validation::validate_post_changes(changes)?;

        let post = sqlx::query_as::<_, Post>(
            "UPDATE posts SET \
                title = COALESCE(?, title), \
                content = COALESCE(?, content), \
                updated_at = MAX(?, created_at) \
             WHERE id = ? \
             RETURNING id, title, content, user_id, created_at, updated_at",
        )
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match &post {
            Some(_) => info!(id, "Updated post"),
            None => debug!(id, "Update skipped, post not found"),
        }
        Ok(post)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(id, "Deleted post");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{NewPost, NewUser, PostChanges};
    use crate::storage::Store;
    use chrono::{Duration, Utc};

    async fn store_with_user() -> (Store, i64) {
        let store = Store::in_memory().await.unwrap();
        let user = store
            .users()
            .create(&NewUser::new("writer", "writer@example.com"))
            .await
            .unwrap();
        (store, user.id)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (store, user_id) = store_with_user().await;
        let post = store
            .posts()
            .create(&NewPost::new("Test Post", "Test content", user_id))
            .await
            .unwrap();

        assert!(post.id > 0);
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.content, "Test content");
        assert_eq!(post.user_id, user_id);

        let found = store.posts().get(post.id).await.unwrap();
        assert_eq!(found, Some(post));
    }

    #[tokio::test]
    async fn test_create_accepts_unknown_owner() {
        let store = Store::in_memory().await.unwrap();
        let post = store
            .posts()
            .create(&NewPost::new("Orphan", "No owner", 777))
            .await
            .unwrap();
        assert_eq!(post.user_id, 777);
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_orders() {
        let (store, user_id) = store_with_user().await;
        let other = store
            .users()
            .create(&NewUser::new("other", "other@example.com"))
            .await
            .unwrap();

        store
            .posts()
            .create(&NewPost::new("First", "a", user_id))
            .await
            .unwrap();
        store
            .posts()
            .create(&NewPost::new("Elsewhere", "b", other.id))
            .await
            .unwrap();
        store
            .posts()
            .create(&NewPost::new("Second", "c", user_id))
            .await
            .unwrap();

        let titles: Vec<String> = store
            .posts()
            .list_by_user(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(store.posts().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_owner_and_other_fields() {
        let (store, user_id) = store_with_user().await;
        let post = store
            .posts()
            .create(&NewPost::new("Draft", "Original body", user_id))
            .await
            .unwrap();

        let updated = store
            .posts()
            .update(post.id, &PostChanges::default().with_title("Final"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.content, "Original body");
        assert_eq!(updated.user_id, user_id);
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_create_stores_values_verbatim() {
        let (store, user_id) = store_with_user().await;
        let long_title = "t".repeat(201);

        let empty = store
            .posts()
            .create(&NewPost::new("", "", user_id))
            .await
            .unwrap();
        assert_eq!(empty.title, "");
        assert_eq!(empty.content, "");

        let long = store
            .posts()
            .create(&NewPost::new(long_title.as_str(), "body", user_id))
            .await
            .unwrap();
        assert_eq!(long.title, long_title);
    }

    #[tokio::test]
    async fn test_update_never_moves_updated_at_before_created_at() {
        let (store, user_id) = store_with_user().await;
        let post = store
            .posts()
            .create(&NewPost::new("Dated", "body", user_id))
            .await
            .unwrap();

        sqlx::query("UPDATE posts SET created_at = ? WHERE id = ?")
            .bind(Utc::now() + Duration::days(1))
            .bind(post.id)
            .execute(&store.pool)
            .await
            .unwrap();

        let updated = store
            .posts()
            .update(post.id, &PostChanges::default().with_content("edited"))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let store = Store::in_memory().await.unwrap();
        let updated = store
            .posts()
            .update(5, &PostChanges::default().with_content("x"))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!store.posts().delete(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let (store, user_id) = store_with_user().await;
        let post = store
            .posts()
            .create(&NewPost::new("Short lived", "body", user_id))
            .await
            .unwrap();

        assert!(store.posts().delete(post.id).await.unwrap());
        assert_eq!(store.posts().get(post.id).await.unwrap(), None);
        assert!(store.posts().list_by_user(user_id).await.unwrap().is_empty());
    }
}
