use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_mcp_rust::config::Config;
use weather_mcp_rust::router::create_app_router;
use weather_mcp_rust::state::AppState;
use weather_mcp_rust::weather::adapter::OpenWeatherAdapter;

#[tokio::main]
async fn main() {
    // Honor a local .env before reading configuration
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Build the provider and application state
    let adapter = match OpenWeatherAdapter::from_config(&config) {
        Ok(adapter) => adapter,
        Err(e) => {
            eprintln!("failed to build weather adapter: {e}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState::new(Arc::new(adapter)));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    info!(host = %config.host, port = config.port, "starting MCP weather server");
    info!("endpoints: POST /mcp, GET /capabilities");

    // Start the server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}
