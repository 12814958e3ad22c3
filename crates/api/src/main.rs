use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use coursehub_api::config::ServerConfig;
use coursehub_api::notifications::NotificationRouter;
use coursehub_api::router::build_app_router;
use coursehub_api::state::AppState;
use coursehub_events::{EmailConfig, EmailDelivery, EventBus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursehub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = coursehub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    coursehub_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    coursehub_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let delivery = match EmailConfig::from_env() {
        Some(email_config) => match EmailDelivery::new(email_config) {
            Ok(delivery) => Some(delivery),
            Err(e) => {
                tracing::error!(error = %e, "Invalid SMTP configuration, emails disabled");
                None
            }
        },
        None => {
            tracing::info!("SMTP_HOST not set, instructor emails disabled");
            None
        }
    };

    let event_bus = Arc::new(EventBus::default());
    let router_handle = tokio::spawn(
        NotificationRouter::new(pool.clone(), delivery).run(event_bus.subscribe()),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Handlers hold clones of the bus through AppState; once the server has
    // stopped, dropping ours closes the channel and lets the router drain.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, router_handle).await.is_err() {
        tracing::warn!("Notification router did not drain in time");
    }
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
