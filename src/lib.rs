//! # backend-test - a GraphQL backend for users and posts
//!
//! Users and the posts they write are stored in SQLite and exposed through a
//! single GraphQL endpoint. Every field maps to one repository call, and every
//! write is one statement that commits immediately.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the tables
//! backend-test init-db
//!
//! # Serve GraphQL on http://localhost:5000/graphql
//! backend-test serve
//!
//! # Run a query without starting the server
//! backend-test query '{ users { id username } }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Profiles and environment-driven settings
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP routes
//! - [`model`]: Data models (User, Post and their change sets)
//! - [`storage`]: SQLite store and repositories
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading.
///
/// Resolves the database URL and secret key from flags, environment and
/// profile defaults.
pub mod config;

/// Error types and result aliases.
///
/// Defines `AppError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum router serving it.
pub mod graphql;

/// Data models for users and posts.
pub mod model;

/// SQLite storage layer.
///
/// Handles the connection pool, table creation and CRUD queries.
pub mod storage;

/// Input validation utilities.
///
/// Rejects empty values supplied to an update before they reach the database.
pub mod validation;

pub mod logging;
