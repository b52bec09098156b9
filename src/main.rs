use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use user_store::{http, Config, JsonFileStore, UserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let store = JsonFileStore::new(&config.users_file_path);
    store
        .init()
        .with_context(|| format!("preparing {}", config.users_file_path.display()))?;

    let repo = Arc::new(UserRepository::new(store).with_id_policy(config.id_policy.into()));
    tracing::info!(
        path = %config.users_file_path.display(),
        id_policy = ?repo.id_policy(),
        "user store ready"
    );

    let addr = config.bind_addr();
    http::serve(repo, &addr)
        .await
        .with_context(|| format!("serving on {}", addr))?;
    Ok(())
}
