use crate::error::{BridgeError, BridgeErrorExt};
use ksync_domain::config::LoggingConfig;
use ksync_logger::{Logger, Rotation};

/// Log file prefix.
const LOG_NAME: &str = "ksync";

/// Installs the global subscriber described by the `logging` section.
///
/// Keep the returned [`Logger`] alive while file output should be flushed.
///
/// # Errors
/// Returns [`BridgeError::Logger`] for an unknown level or filter, an unusable log
/// directory, or when a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Logger, BridgeError> {
    let mut builder = Logger::builder()
        .name(LOG_NAME)
        .console(config.console)
        .level_str(&config.level)
        .context("Invalid logging.level")?;
    if let Some(filter) = &config.filter {
        builder = builder.env_filter(filter.clone());
    }

    let logger = match &config.directory {
        Some(directory) => {
            let files = builder.path(directory.clone()).rotation(Rotation::DAILY);
            if config.json { files.json().init() } else { files.init() }
        },
        None => builder.init(),
    };
    logger.context("Failed to install logging")
}
