use pokemon_api::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pokemon_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        environment = ?config.environment,
        data_file = %config.data_file.display(),
        "starting pokemon-api"
    );

    let store = JsonFileStore::open(&config.data_file).await?;

    ServerBuilder::new()
        .with_config(config)
        .with_store(store)
        .serve()
        .await
}
