//! Blog post API server: loads config from env (and `.env`), connects the post store,
//! serves until Ctrl-C / SIGTERM, then closes the pool.

use blog_post_api::{app, AppConfig, AppState, MemoryPostStore, PgPostStore, PostStore, StoreKind};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_post_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pg = match config.store {
        StoreKind::Postgres => {
            let pg = PgPostStore::connect(&config.database).await.map_err(|e| {
                tracing::error!(error = %e, "unable to connect to database");
                e
            })?;
            tracing::info!("connected to the database");
            Some(pg)
        }
        StoreKind::Memory => None,
    };
    let store: Arc<dyn PostStore> = match &pg {
        Some(pg) => Arc::new(pg.clone()),
        None => {
            tracing::warn!("using in-memory post store; data is lost on exit");
            Arc::new(MemoryPostStore::new())
        }
    };

    let router = app(AppState::new(store), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg) = pg {
        pg.close().await;
        tracing::info!("database pool closed");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
