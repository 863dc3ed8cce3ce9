use anyhow::Result;

use super::CommandContext;
use super::query::execute_document;

pub async fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    // Auto-wrap in mutation { }
    let document = format!("mutation {{ {} }}", mutation);
    execute_document(ctx, document, variables).await
}
