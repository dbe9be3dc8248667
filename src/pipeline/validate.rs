// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("    Site: {}", config.scraper.base_url);
    log::info!("    User-Agent: {}", config.scraper.user_agent);
    log::info!("    Timeout: {}s", config.scraper.timeout_secs);
    log::info!("    Page delay: {}ms", config.scraper.page_delay_ms);
    log::info!("    On item error: {:?}", config.scraper.on_item_error);
    log::info!("    Source file: {}", config.storage.source_file.display());
    log::info!("    Listen: {}", config.server.bind_address());

    Ok(())
}
