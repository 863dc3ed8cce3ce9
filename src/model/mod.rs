//! Data models for users and posts.
//!
//! - [`User`]: a row of the `users` table
//! - [`Post`]: a row of the `posts` table, owned by a user through `user_id`
//! - [`NewUser`] / [`NewPost`]: creation payloads
//! - [`UserChanges`] / [`PostChanges`]: partial updates where `None` means "leave as is"

mod post;
mod user;

pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User, UserChanges};
