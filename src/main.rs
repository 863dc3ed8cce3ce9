use anyhow::Result;
use clap::Parser;

use backend_test::cli::handlers::{
    CommandContext, handle_init_db, handle_mutate, handle_query, handle_serve,
};
use backend_test::cli::{Cli, Commands};
use backend_test::config::AppConfig;
use backend_test::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let config = AppConfig::load(cli.profile, cli.database_url.clone())?;
    tracing::debug!(profile = %config.profile, database = %config.database_url, "Loaded configuration");
    let ctx = CommandContext::new(config).await?;

    match cli.command {
        Commands::Serve { host, port } => handle_serve(ctx, host, port).await,
        Commands::InitDb => handle_init_db(ctx).await,
        Commands::Query { query, variables } => handle_query(ctx, query, variables).await,
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(ctx, mutation, variables).await,
    }
}
