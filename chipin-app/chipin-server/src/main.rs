use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use chipin_api::{build_router, AppState};
use chipin_core::repositories::{GroupRepository, UserRepository};
use chipin_core::User;
use chipin_infrastructure::{
    create_notifier, create_pool, run_migrations, MemoryStore, PgGroupRepository, PgUserRepository,
};
use chipin_security::JwtService;
use chipin_shared::config::{AppConfig, DatabaseDriver};
use chipin_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Keep the guard alive so the file writer flushes on shutdown.
    let _log_guard = init_telemetry(&config.log)?;

    info!(env = %config.app.env, "ChipIn server starting...");

    let jwt = JwtService::new(config.jwt.secret.clone(), config.jwt.access_token_expiry);

    let (users, groups): (Arc<dyn UserRepository>, Arc<dyn GroupRepository>) = match config.database.driver {
        DatabaseDriver::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .context("failed to connect to database")?;
            info!("Database connection established.");

            if config.database.run_migrations {
                run_migrations(&pool).await.context("failed to run migrations")?;
                info!("Migrations applied.");
            }

            let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
            let groups: Arc<dyn GroupRepository> = Arc::new(PgGroupRepository::new(pool));
            (users, groups)
        }
        DatabaseDriver::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown.");
            let store = Arc::new(MemoryStore::new());

            for seed in &config.database.seed_users {
                let user = User::new(&seed.username, &seed.email);
                if config.app.env == "development" {
                    let token = jwt.generate_access_token(&user.id)?;
                    info!(username = %user.username, user_id = %user.id, %token, "Seeded user");
                } else {
                    info!(username = %user.username, user_id = %user.id, "Seeded user");
                }
                store.insert_user(user).await;
            }

            let users: Arc<dyn UserRepository> = store.clone();
            let groups: Arc<dyn GroupRepository> = store;
            (users, groups)
        }
    };

    let notifier = create_notifier(&config.mail).context("failed to configure mail transport")?;
    info!(transport = ?config.mail.transport, "Mail transport ready.");

    let state = AppState::new(
        groups,
        users,
        notifier,
        jwt,
        config.app.base_url.clone(),
        config.app.name.clone(),
    );

    let app = build_router(state, Duration::from_secs(config.app.request_timeout_secs));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ChipIn server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
