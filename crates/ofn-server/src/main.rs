//! OFN Server - Main entry point

use anyhow::Result;
use ofn_common::logging::{init_logging, LogConfig};
use ofn_server::{api, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("ofn-server")
        .filter_directives("ofn_server=debug,ofn_ingest=info,tower_http=debug")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting OFN Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}, offers retained for {}s",
        config.bind_address(),
        config.dedupe.retention_secs
    );

    api::serve(config).await
}
