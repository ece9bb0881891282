use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use logistics_assistant::config::Config;
use logistics_assistant::routes;
use logistics_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config)?);

    info!(
        chat_configured = state.chatbot.is_configured(),
        shipping_configured = state.shipping.is_configured(),
        "backends loaded"
    );

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("🚚 logistics assistant running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
