use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relplan_api::config::ServerConfig;
use relplan_api::router::build_app_router;
use relplan_api::state::AppState;
use relplan_notify::{EmailConfig, Mailer};
use relplan_store::{migrate_releases, Store};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relplan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Record store ---
    let store = Store::new(&config.data_dir);
    store.init().await.expect("Failed to initialize data directory");
    tracing::info!(data_dir = %config.data_dir.display(), "Record store initialized");

    let migrated = migrate_releases(&store)
        .await
        .expect("Failed to migrate release records");
    if migrated > 0 {
        tracing::info!(migrated, "Backfilled completion fields on legacy releases");
    }

    // --- Mailer ---
    let mailer = EmailConfig::from_env().map(|email_config| {
        tracing::info!(
            smtp_host = %email_config.smtp_host,
            smtp_port = email_config.smtp_port,
            "Email delivery configured"
        );
        Arc::new(Mailer::new(email_config))
    });
    if mailer.is_none() {
        tracing::info!("SMTP_HOST not set; email delivery disabled");
    }

    // --- App state ---
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
        mailer,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!(%addr, "Release planning server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve on SIGINT (Ctrl-C) or SIGTERM so the server can drain
/// in-flight requests before exiting.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
