use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use showbill_db::AppState;
use showbill_server::ServerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = showbill_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = showbill_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    showbill_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let config = ServerConfig::from_env();
    let state = Arc::new(AppState { db });
    let app = showbill_server::app(state, &config);

    tracing::info!(addr = %config.bind, "server started");

    axum::serve(
        tokio::net::TcpListener::bind(config.bind)
            .await
            .expect("failed to bind listener"),
        app,
    )
    .await
    .expect("server error");
}
