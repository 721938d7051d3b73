//! Quills API gateway binary.
//!
//! Serves the reverse proxy on port 8080 by default, routing
//! `/api/users/*` to the users service and `/api/books/*` to the books
//! service.

#![cfg_attr(not(test), forbid(unsafe_code))]

use quills_gateway::{GatewayConfig, ProxyState, app};

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set the environment directly
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = GatewayConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quills_gateway=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = ProxyState::new(&config);
    let app = app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!(
        users = %config.users_service_url,
        books = %config.books_service_url,
        "gateway listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
