use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use tracing::warn;

use super::CommandContext;
use crate::config::Profile;
use crate::graphql::{GRAPHQL_PATH, build_schema, run_server, verify_root_fields};

pub async fn handle_serve(ctx: CommandContext, host: IpAddr, port: u16) -> Result<()> {
    if ctx.config.profile == Profile::Production && ctx.config.uses_default_secret() {
        warn!("SECRET_KEY is not set, falling back to the development secret");
    }

    ctx.store.init_schema().await?;
    let schema = build_schema(ctx.store);
    verify_root_fields(&schema).await?;

    let addr = SocketAddr::new(host, port);
    println!("Starting GraphQL server on http://{}{}", addr, GRAPHQL_PATH);
    println!("GraphQL Explorer: http://{}{}", addr, GRAPHQL_PATH);

    run_server(schema, addr).await?;
    Ok(())
}
