use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uibridge::api::{routes::create_router, state::AppState};
use uibridge::config::Config;
use uibridge::engine::Automation;
use uibridge::platform::desktop::{DesktopGraph, DesktopInput, DesktopScreen, LogNotifier};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Create application state and attach the desktop platform
    let state = Arc::new(AppState::new(Arc::new(LogNotifier)));
    state.attach_engine(Arc::new(Automation::new(
        Arc::new(DesktopGraph::new()),
        Arc::new(DesktopInput::new()),
        Arc::new(DesktopScreen::new()),
    )));

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid HOST/PORT configuration");
    tracing::info!("uibridge starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
