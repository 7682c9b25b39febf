//! Chirp entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chirp::inbound::http::health::HealthState;
use chirp::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.pool_config() {
        Some(pool_config) => {
            migrate(&pool_config).await?;
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => info!("no database configured; using the in-memory store"),
    }

    #[cfg(feature = "example-data")]
    seed(&config).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    health_state.mark_ready();
    server.await?;
    Ok(())
}

async fn migrate(pool_config: &PoolConfig) -> color_eyre::Result<()> {
    let url = pool_config.database_url().to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("database migration failed")?;
    Ok(())
}

#[cfg(feature = "example-data")]
async fn seed(config: &ServerConfig) -> color_eyre::Result<()> {
    use chirp::example_data::ExampleDataSettings;

    let settings = ExampleDataSettings::load_from_iter([std::ffi::OsString::from("chirp")])
        .map_err(|err| eyre!("failed to load example data settings: {err}"))?;
    server::seed_store(config.store(), &settings)
        .await
        .wrap_err("example data seeding failed")?;
    Ok(())
}
