use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use firenet_mock::config::Settings;
use firenet_mock::services::FileTemplateStore;
use firenet_mock::utils::logger::init_logger;
use firenet_mock::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging
    init_logger(settings.logging.directory.as_deref())?;
    info!("Starting Firenet mock...");

    // Templates are read on every request; fail now if they are unusable
    let templates = FileTemplateStore::new(&settings.templates);
    templates.preflight()?;
    info!(
        "Templates found in {}",
        settings.templates.directory.display()
    );

    let cleanup_interval = settings.cleanup_interval();
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::new(settings, Arc::new(templates))?;
    state.sessions.spawn_cleanup(cleanup_interval);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Rika Firenet mock listening on port {}", addr.port());

    axum::serve(listener, app).await?;

    Ok(())
}
