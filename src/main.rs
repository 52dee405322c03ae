use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use frameweaver::{
    config::Config,
    data::{credential::InMemoryCredentialStore, project_file::InMemoryProjectFileStore},
    router, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client()?;

    let address = format!("{}:{}", config.host, config.port);

    let state = AppState::new(
        http_client,
        Arc::new(config),
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemoryProjectFileStore::new()),
    );

    let app = router::router(state);

    tracing::info!("Starting server on {}", address);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
