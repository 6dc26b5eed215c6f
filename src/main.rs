use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use modhub_api::{
    api::{create_router, AppState},
    config::Config,
    services::OpenRouterAssistant,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("modhub_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let mut state = AppState::new();
    match config.assistant_api_key.clone() {
        Some(api_key) => {
            let assistant = OpenRouterAssistant::new(
                api_key,
                config.assistant_api_url.clone(),
                config.assistant_model.clone(),
            );
            state = state.with_assistant(Arc::new(assistant));
        }
        None => tracing::warn!("ASSISTANT_API_KEY not set, assistant endpoint disabled"),
    }

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
