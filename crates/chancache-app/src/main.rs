//! # Chancache
//!
//! Loads configuration, wires the cached channel store, seeds demo data
//! and runs the member count scenario against it.

use chancache_app::{startup, AppBuilder};
use chancache_config::ConfigLoader;
use chancache_core::telemetry::init_logging;
use chancache_core::ChancacheResult;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("chancache: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> ChancacheResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability.log_level, config.observability.log_format)?;

    startup::print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    startup::print_startup_info(&config);

    let metrics_handle = if config.observability.metrics_enabled {
        Some(startup::install_metrics_recorder()?)
    } else {
        None
    };

    let report = AppBuilder::new().with_config(config).run().await?;

    for (step, result) in report.steps.iter().enumerate() {
        match result.member_count {
            Some(count) => info!("step {}: {} -> {}", step + 1, result.action, count),
            None => info!("step {}: {}", step + 1, result.action),
        }
    }
    info!(
        "User {} belongs to {} channels",
        report.demo.user_ids[0], report.memberships_for_first_user
    );
    for (cache, entries) in &report.cache_entries {
        info!("cache {}: {} entries", cache, entries);
    }

    if let Some(handle) = metrics_handle {
        println!("{}", handle.render());
    }

    Ok(())
}
