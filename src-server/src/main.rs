use potluck_lib::ServerConfig;
use rolling_logger::LoggerOptions;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().map_err(anyhow::Error::msg)?;

    let log_path = rolling_logger::init_logger_with(
        &config.log_dir,
        "potluck",
        LoggerOptions {
            max_bytes: config.log_max_bytes,
            max_files: config.log_max_files,
            ..LoggerOptions::default()
        },
    )?;
    let _ = rolling_logger::info("potluck starting");
    info!(log = %log_path.display(), bind = %config.bind, "logging initialized");

    potluck_lib::run(config).await
}
