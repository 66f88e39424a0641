use pool_passport::{catalog::load_catalog, load_data, router, AppState, Config, Session};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let catalog = match load_catalog(&config.catalog_path).await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("error loading pools list from {}: {err}", config.catalog_path.display());
            return Err(err.into());
        }
    };
    info!(
        pools = catalog.len(),
        data = %config.data_path.display(),
        "loaded pool catalog"
    );

    let store = load_data(&config.data_path).await;
    let session = Session::new(catalog, store, config.stamps_per_page);
    let app = router(AppState::new(config.data_path, session));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
