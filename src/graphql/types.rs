use super::schema::store;
use crate::model;
use async_graphql::{ComplexObject, Context, ID, SimpleObject};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    #[graphql(skip)]
    pub key: i64,
}

#[ComplexObject]
impl User {
    /// Posts written by this user, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Post>> {
        let posts = store(ctx)?.posts().list_by_user(self.key).await?;
        Ok(posts.into_iter().map(Post::from).collect())
    }
}

impl From<model::User> for User {
    fn from(u: model::User) -> Self {
        Self {
            id: ID::from(u.id.to_string()),
            username: u.username,
            email: u.email,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
            key: u.id,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: ID,
    pub title: String,
    pub content: String,
    pub user_id: ID,
    pub created_at: String,
    pub updated_at: String,
    #[graphql(skip)]
    pub owner_key: i64,
}

#[ComplexObject]
impl Post {
    /// The owning user, or null once that user has been deleted
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<User>> {
        let user = store(ctx)?.users().get(self.owner_key).await?;
        Ok(user.map(User::from))
    }
}

impl From<model::Post> for Post {
    fn from(p: model::Post) -> Self {
        Self {
            id: ID::from(p.id.to_string()),
            title: p.title,
            content: p.content,
            user_id: ID::from(p.user_id.to_string()),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            owner_key: p.user_id,
        }
    }
}
