//! GraphQL schema, resolvers and HTTP endpoint.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! backend-test serve --port 5000
//!
//! # Execute a query from CLI
//! backend-test query '{ users { id username posts { title } } }'
//!
//! # Execute a mutation from CLI
//! backend-test mutate 'createUser(username: "ada", email: "ada@example.com") { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `users`, `user`, `posts`, `post`
//! - **Mutations**: `createUser`, `createPost`, `updateUser`, `updatePost`,
//!   `deleteUser`, `deletePost`
//!
//! ## Routes
//!
//! - `POST /graphql`: execute a document
//! - `GET /graphql`: GraphiQL explorer
//! - `GET /health`: liveness check

mod schema;
mod server;
mod types;

pub use schema::{
    AppSchema, MUTATION_FIELDS, MutationRoot, QUERY_FIELDS, QueryRoot, build_schema,
    verify_root_fields,
};
pub use server::{GRAPHQL_PATH, SERVICE_NAME, response_status, router, run_server};
pub use types::*;
