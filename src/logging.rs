use anyhow::Context;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.  Logging is off unless it is
/// set.
pub(crate) const LOG_ENV: &str = "RAINBOW_SNAKE_LOG";

/// Environment variable holding the path of the log file
pub(crate) const LOG_FILE_ENV: &str = "RAINBOW_SNAKE_LOG_FILE";

/// Return the file to log to: the one named by [`LOG_FILE_ENV`] or, if that
/// is not set, `rainbow-snake.log` in the local data directory
fn log_file_path() -> Option<PathBuf> {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::data_local_dir().map(|p| p.join("rainbow-snake").join("rainbow-snake.log")))
}

/// Install a subscriber writing to the log file if [`LOG_ENV`] is set.  The
/// terminal is in use by the game, so logs never go to stdout or stderr.
///
/// Returns the path logged to, if any.
pub(crate) fn init() -> anyhow::Result<Option<PathBuf>> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(None);
    }
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .with_context(|| format!("invalid log filter in ${LOG_ENV}"))?;
    let path = log_file_path().context("failed to determine path for log file")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(Some(path))
}
