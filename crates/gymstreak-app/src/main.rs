use anyhow::Context;
use tracing::info;

use gymstreak_infrastructure::logging::init_logger;
use gymstreak_infrastructure::AppConfig;
use gymstreak_lib::bootstrap;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    init_logger(config.log_dir.clone()).context("Failed to initialize logger")?;

    let state = bootstrap(&config)
        .await
        .context("Failed to initialize application state")?;

    state.services.scheduler.start().await;

    info!(
        database = %config.database_path.display(),
        advance_at = %format!(
            "{:02}:{:02}",
            config.rotation_advance_hour, config.rotation_advance_minute
        ),
        "gymstreak daemon running"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutdown requested");
    state.services.scheduler.stop().await;

    Ok(())
}
