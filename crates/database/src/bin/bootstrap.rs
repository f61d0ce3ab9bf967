use database::{Store, StoreConfig};
use log::{error, info};
use std::{error::Error, process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    // load .env before the logger reads RUST_LOG
    dotenvy::dotenv().ok();
    env_logger::init();

    match bootstrap().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Bootstrap failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn bootstrap() -> Result<(), Box<dyn Error>> {
    let config = StoreConfig::from_env()?;
    info!(
        "Pool: {}..={} connections, acquire timeout {:?}, idle timeout {:?}, max lifetime {:?}",
        config.min_connections,
        config.max_connections,
        config.acquire_timeout,
        config.idle_timeout,
        config.max_lifetime
    );
    info!(
        "Operation deadline {:?}, reservation slots of {} minutes",
        config.operation_timeout, config.reservation_minutes
    );

    let store = Store::connect(&config).await?;
    store.migrate().await?;
    info!("Schema is up to date");

    store.close().await?;
    Ok(())
}
