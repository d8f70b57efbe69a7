use std::sync::Arc;

use rota_app::app::api::routes;
use rota_app::config::ConfigHandler;
use rota_app::store_handler::StoreHandler;
use rota_core::config::load_config;
use rota_service::store::{MemoryStore, ScheduleStore};
use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting rota scheduling server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = match &config.store.seed_path {
        Some(path) => {
            let store = MemoryStore::load(path)?;
            tracing::info!(seed_path = %path, "Store seeded");
            store
        }
        None => {
            tracing::warn!("No store.seed_path configured, starting with an empty store");
            MemoryStore::new()
        }
    };
    let store: Arc<dyn ScheduleStore> = Arc::new(store);

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(StoreHandler { store })
        .hoop(ConfigHandler::new(config))
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
