mod init_db;
mod mutate;
mod query;
mod serve;

pub use init_db::handle_init_db;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use serve::handle_serve;

use crate::config::AppConfig;
use crate::storage::Store;
use anyhow::{Context, Result};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: AppConfig,
    pub store: Store,
}

impl CommandContext {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = Store::connect(&config.database_url)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_url))?;
        Ok(Self { config, store })
    }
}
