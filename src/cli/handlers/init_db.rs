use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub async fn handle_init_db(ctx: CommandContext) -> Result<()> {
    ctx.store.init_schema().await?;
    println!(
        "{} database at {}",
        "Initialized".green(),
        ctx.config.database_url
    );
    Ok(())
}
