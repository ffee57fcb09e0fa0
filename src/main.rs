use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinescope::{
    db::{create_pool, Repository},
    services::{MovieIdentifier, OmdbProvider},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinescope=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if !config.is_omdb_configured() {
        tracing::warn!("OMDB_API_KEY is not configured; movie lookups will fail");
    }

    let ai = config.ai_config();
    match &ai {
        Some(ai) => tracing::info!(model = %ai.model, "AI identification enabled"),
        None => tracing::warn!("OPENROUTER_API_KEY not set; using keyword identification only"),
    }

    let pool = create_pool(&config.database_url).await?;

    let provider = OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.provider_timeout(),
    )?;
    let identifier = MovieIdentifier::new(ai)?;

    let address = config.bind_address();
    let state = Arc::new(AppState {
        config,
        repo: Repository::new(pool),
        provider: Arc::new(provider),
        identifier,
    });

    let app = cinescope::create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "CineScope listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
