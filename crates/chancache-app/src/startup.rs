//! Startup utilities.

use chancache_config::AppConfig;
use chancache_core::{ChancacheError, ChancacheResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
        __                                 __
  _____/ /_  ____ _____  _________ ______/ /_  ___
 / ___/ __ \/ __ `/ __ \/ ___/ __ `/ ___/ __ \/ _ \
/ /__/ / / / /_/ / / / / /__/ /_/ / /__/ / / /  __/
\___/_/ /_/\__,_/_/ /_/\___/\__,_/\___/_/ /_/\___/

                 channel cache layer
    "#);
}

/// Prints the effective configuration.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment:  {}", config.app.environment);
    info!("Local cache:  {}", if config.cache.enabled { "enabled" } else { "disabled" });
    if config.cache.enabled {
        info!("Max value:    {} bytes", config.cache.max_value_bytes);
        for (family, settings) in config.cache.families() {
            info!(
                "  {:<20} size {:>6}, ttl {}s",
                family, settings.size, settings.expiry_secs
            );
        }
    }
    info!("Log level:    {} ({})", config.observability.log_level, config.observability.log_format);
    info!("Metrics:      {}", config.observability.metrics_enabled);
    info!("{}", separator);
}

/// Installs the global Prometheus recorder and describes the cache metrics.
pub fn install_metrics_recorder() -> ChancacheResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ChancacheError::internal(format!("Failed to install metrics recorder: {}", e)))?;

    chancache_localcache::register_metrics();
    Ok(handle)
}
