use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymlog::config::Config;
use gymlog::repositories::LoginSessionRepository;
use gymlog::{db, migrations, routes, version};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymlog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Connecting to database: {}", config.database_url);
    let pool = db::create_pool(&config.database_url)?;

    migrations::run_migrations(&pool)?;

    let removed = LoginSessionRepository::new(pool.clone())
        .cleanup_expired()
        .await?;
    if removed > 0 {
        tracing::info!("Removed {} expired login sessions", removed);
    }

    let app = routes::app(&pool);

    // Start server
    let addr = config.server_addr();
    tracing::info!(
        "Starting gymlog {} at http://{}",
        version::GIT_VERSION,
        addr
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
