use std::fs;
use std::net::SocketAddr;

use institute_service::bootstrap::initialize_defaults;
use institute_service::redis_service::init_redis_connection;
use institute_service::static_service::get_database_connection;
use institute_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    tracing::info!("Create upload folder");
    fs::create_dir_all("./uploads")?;

    let db_connection = get_database_connection().await;

    if APP_CONFIG.use_redis {
        tracing::info!("Initializing Redis connection...");
        if let Err(e) = init_redis_connection().await {
            tracing::error!("Failed to initialize Redis connection: {}", e);
            tracing::warn!("Continuing without Redis (caching and lockouts degrade)...");
        } else {
            tracing::info!("Redis connection initialized successfully");
        }
    }

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_defaults(db_connection).await {
        tracing::error!("Failed to initialize defaults: {}", e);
        tracing::warn!("Continuing without default admin initialization...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
