use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use async_graphql::ServerError;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, rejection::GraphQLRejection};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use super::schema::AppSchema;
use crate::error::Result;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "backend-test";

pub const GRAPHQL_PATH: &str = "/graphql";

pub fn router(schema: AppSchema) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .with_state(schema)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run_server(schema: AppSchema, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "GraphQL server listening");

    axum::serve(listener, router(schema))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("GraphQL server stopped");
    Ok(())
}

async fn graphql_handler(
    State(schema): State<AppSchema>,
    request: std::result::Result<GraphQLRequest, GraphQLRejection>,
) -> impl IntoResponse {
    let request = match request {
        Ok(request) => request,
        Err(rejection) => return rejected_body(rejection),
    };

    let response = schema.execute(request.into_inner()).await;
    let status = response_status(&response);
    if status != StatusCode::OK {
        debug!(%status, errors = response.errors.len(), "GraphQL request rejected");
    }
    (status, GraphQLResponse::from(response))
}

/// A body that could not be read as a GraphQL request still gets an
/// `errors` envelope.
fn rejected_body(rejection: GraphQLRejection) -> (StatusCode, GraphQLResponse) {
    debug!(error = %rejection.0, "Unreadable GraphQL request body");
    let response =
        async_graphql::Response::from_errors(vec![ServerError::new(rejection.0.to_string(), None)]);
    (StatusCode::BAD_REQUEST, GraphQLResponse::from(response))
}

/// 400 when the document could not be executed at all.
///
/// Parse and validation errors carry no field path; errors raised while
/// resolving a field always do, and leave the status at 200.
pub fn response_status(response: &async_graphql::Response) -> StatusCode {
    if response.errors.iter().any(|err| err.path.is_empty()) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .title("GraphQL Explorer")
            .finish(),
    )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{PathSegment, Response, Value as GqlValue};

    #[test]
    fn test_request_errors_are_bad_request() {
        let response = Response::from_errors(vec![ServerError::new("syntax error", None)]);
        assert_eq!(response_status(&response), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_field_errors_keep_ok() {
        let mut err = ServerError::new("boom", None);
        err.path = vec![PathSegment::Field("createUser".to_string())];
        let mut response = Response::new(GqlValue::Null);
        response.errors.push(err);
        assert_eq!(response_status(&response), StatusCode::OK);
    }

    #[test]
    fn test_success_is_ok() {
        let response = Response::new(GqlValue::Null);
        assert_eq!(response_status(&response), StatusCode::OK);
    }
}
