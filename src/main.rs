use bookmarks_api::app;
use bookmarks_api::config::{Cli, Config};
use bookmarks_api::db::Database;
use bookmarks_api::handler::AppState;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // a missing .env file is normal outside development
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("bookmarks-api.svc starting");
    if let Ok(path) = dotenv {
        tracing::info!(path = ?path, "loaded environment file");
    }

    // If --config is provided, its parent directory holds the database.
    // Otherwise ~/.bookmarks/config.yaml is used when present, else the environment.
    let (cfg, data_dir) = Config::resolve(args.config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %format!("{e:#}"), "failed to load config");
        std::process::exit(1);
    });

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(error = %e, path = ?data_dir, "failed to create data directory");
        std::process::exit(1);
    }

    let db = Database::new(&cfg, &data_dir).await.unwrap_or_else(|e| {
        tracing::error!(error = %format!("{e:#}"), "failed to setup database");
        std::process::exit(1);
    });

    if cfg.app.api_token.is_none() {
        tracing::warn!("no api_token configured, /api routes are open");
    }

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let router = app(AppState::new(db, cfg.app.api_token.clone()));

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("bookmarks-api.svc running on {}", &address);
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl+c");
                std::future::pending::<()>().await;
            }
            tracing::info!("ctrl+c signal received, preparing to shutdown");
        })
        .await;

    if let Err(err) = served {
        tracing::error!(error = %err, "server exited with an error");
        std::process::exit(1);
    }

    tracing::info!("bookmarks-api.svc going off, graceful shutdown complete");
}
