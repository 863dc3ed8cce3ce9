use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use crate::error::AppError;
use crate::model::{NewPost, NewUser, PostChanges, UserChanges};
use crate::storage::Store;

use super::types::*;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Root query fields the schema must expose.
pub const QUERY_FIELDS: &[&str] = &["users", "user", "posts", "post"];

/// Root mutation fields the schema must expose.
pub const MUTATION_FIELDS: &[&str] = &[
    "createUser",
    "createPost",
    "updateUser",
    "updatePost",
    "deleteUser",
    "deletePost",
];

const ROOT_FIELDS_QUERY: &str =
    "{ __schema { queryType { fields { name } } mutationType { fields { name } } } }";

pub fn build_schema(store: Store) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// Check the root fields reported by introspection against
/// [`QUERY_FIELDS`] and [`MUTATION_FIELDS`].
pub async fn verify_root_fields(schema: &AppSchema) -> crate::error::Result<()> {
    let response = schema.execute(ROOT_FIELDS_QUERY).await;
    if let Some(err) = response.errors.first() {
        return Err(AppError::Config(format!(
            "Schema introspection failed: {}",
            err.message
        )));
    }

    let data = response.data.into_json()?;
    for (root, expected) in [("queryType", QUERY_FIELDS), ("mutationType", MUTATION_FIELDS)] {
        let mut actual: Vec<&str> = data["__schema"][root]["fields"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|f| f["name"].as_str())
                    .filter(|name| !name.starts_with("__"))
                    .collect()
            })
            .unwrap_or_default();
        let mut expected = expected.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();

        if actual != expected {
            return Err(AppError::Config(format!(
                "{} exposes {:?}, expected {:?}",
                root, actual, expected
            )));
        }
    }
    Ok(())
}

pub(super) fn store<'ctx>(ctx: &Context<'ctx>) -> async_graphql::Result<&'ctx Store> {
    ctx.data::<Store>()
}

/// Ids are integers in storage; anything else names no record.
fn parse_id(id: &ID) -> Option<i64> {
    id.parse().ok()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let users = store(ctx)?.users().list().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<User>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let user = store(ctx)?.users().get(id).await?;
        Ok(user.map(User::from))
    }

    /// List all posts
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let posts = store(ctx)?.posts().list().await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Get a single post by ID
    async fn post(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Post>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let post = store(ctx)?.posts().get(id).await?;
        Ok(post.map(Post::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
    ) -> async_graphql::Result<User> {
        let user = store(ctx)?
            .users()
            .create(&NewUser { username, email })
            .await?;
        Ok(user.into())
    }

    /// Create a new post owned by `userId`
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        user_id: ID,
    ) -> async_graphql::Result<Post> {
        let user_id =
            parse_id(&user_id).ok_or_else(|| AppError::InvalidId(user_id.as_str().to_owned()))?;
        let post = store(ctx)?
            .posts()
            .create(&NewPost {
                title,
                content,
                user_id,
            })
            .await?;
        Ok(post.into())
    }

    /// Update the supplied fields of a user; null when the user does not exist
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        username: Option<String>,
        email: Option<String>,
    ) -> async_graphql::Result<Option<User>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let changes = UserChanges { username, email };
        let user = store(ctx)?.users().update(id, &changes).await?;
        Ok(user.map(User::from))
    }

    /// Update the supplied fields of a post; null when the post does not exist
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        content: Option<String>,
    ) -> async_graphql::Result<Option<Post>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let changes = PostChanges { title, content };
        let post = store(ctx)?.posts().update(id, &changes).await?;
        Ok(post.map(Post::from))
    }

    /// Delete a user permanently; false when nothing was deleted
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(false);
        };
        Ok(store(ctx)?.users().delete(id).await?)
    }

    /// Delete a post permanently; false when nothing was deleted
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let Some(id) = parse_id(&id) else {
            return Ok(false);
        };
        Ok(store(ctx)?.posts().delete(id).await?)
    }
}
