use flexi_logger::{opt_format, Logger, LoggerHandle};

/// Logs to stderr. `RUST_LOG` wins over `level` when it is set.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(opt_format)
        .start()?;
    Ok(handle)
}
