use crate::graphql::{build_schema, response_status};
use anyhow::Result;
use axum::http::StatusCode;

use super::CommandContext;

pub async fn handle_query(
    ctx: CommandContext,
    query: String,
    variables: Option<String>,
) -> Result<()> {
    execute_document(ctx, query, variables).await
}

/// Run `document` against the store and print the JSON response.
///
/// Fails after printing when the document could not be executed at all.
pub(super) async fn execute_document(
    ctx: CommandContext,
    document: String,
    variables: Option<String>,
) -> Result<()> {
    ctx.store.init_schema().await?;
    let schema = build_schema(ctx.store);

    let vars: async_graphql::Variables = if let Some(v) = variables {
        serde_json::from_str(&v)?
    } else {
        async_graphql::Variables::default()
    };

    let request = async_graphql::Request::new(document).variables(vars);
    let response = schema.execute(request).await;
    let status = response_status(&response);

    println!("{}", serde_json::to_string_pretty(&response)?);

    if status != StatusCode::OK {
        anyhow::bail!("GraphQL request failed");
    }
    Ok(())
}
