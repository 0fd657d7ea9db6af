use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{
    AppState,
    jwt::{JwtConfig, JwtService},
    repositories::MIGRATOR,
    routes,
    settings::{ServerConfig, StorageBackend},
};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Foodl API service");

    let server_config = ServerConfig::from_env()?;
    let jwt_service = JwtService::new(JwtConfig::from_env()?);
    info!(
        "Accepting bearer tokens valid for up to {} seconds",
        jwt_service.token_expiry()
    );

    let app_state = match server_config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            // Check database connectivity
            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            run_migrations(&pool, &MIGRATOR).await?;
            AppState::postgres(pool, jwt_service, server_config.sample_size)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            AppState::in_memory(jwt_service, server_config.sample_size)
        }
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Foodl API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
