use academy_site::{load_notices, load_profile, router, AppState, Page, SiteConfig};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = SiteConfig::from_env();
    if let Some(parent) = config.profile_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let profile = load_profile(&config.profile_path).await;
    let mut page = Page::new(profile);

    let notices_path = config.notices_path();
    match load_notices(&notices_path).await {
        Ok(notices) => {
            page.load(notices);
        }
        Err(err) => error!(path = %notices_path.display(), "{err}; serving page shell"),
    }

    let app = router(AppState::new(&config, page));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
