use std::net::SocketAddr;
use std::sync::Arc;

use flymoon_api::{app, state::AppState};
use flymoon_client::{ClientConfig, HttpBookingApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flymoon_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = flymoon_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Flymoon API on port {}", config.server.port);
    tracing::info!("Canonical host: {}", config.site.canonical_host);

    // Supplier client
    let upstream = HttpBookingApi::new(ClientConfig::from(&config.upstream))
        .expect("Failed to build booking supplier client");

    let app_state = AppState {
        upstream: Arc::new(upstream),
        site: config.site.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
