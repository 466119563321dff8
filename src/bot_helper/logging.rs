//! Logging bootstrap.
//!
//! Logs go to stderr so they never mix with command output on stdout. The
//! level comes from `--verbose` (debug) or the `log-level` setting, and
//! `RUST_LOG` overrides both.
//!
//! Events are metadata only, in `event=<name> status=<ok|error> key=value`
//! form. Record contents (names, phone numbers, note text) are never logged.

use flexi_logger::{LogSpecification, Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Starts the logger once per process. Later calls are ignored.
///
/// Returns an error string when the level is not understood or the backend
/// cannot start; the caller decides whether that matters.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    LOGGER
        .get_or_try_init(|| {
            let spec = LogSpecification::env_or_parse(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?;
            let handle = Logger::with(spec)
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;
            info!(
                "event=app_start status=ok level={} version={}",
                level,
                env!("CARGO_PKG_VERSION")
            );
            Ok(handle)
        })
        .map(|_| ())
}

/// Picks the effective level from the verbose flag and the configured level.
pub fn effective_level(verbose: bool, configured: &str) -> &str {
    if verbose {
        "debug"
    } else {
        configured
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected off|trace|debug|info|warn|error"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_levels() {
        assert_eq!(normalize_level(" WARNING "), Ok("warn"));
        assert_eq!(normalize_level("debug"), Ok("debug"));
        assert!(normalize_level("chatty").is_err());
    }

    #[test]
    fn verbose_wins_over_config() {
        assert_eq!(effective_level(true, "error"), "debug");
        assert_eq!(effective_level(false, "error"), "error");
    }

    #[test]
    fn rejects_unknown_level_before_starting() {
        assert!(init_logging("chatty").is_err());
        assert!(LOGGER.get().is_none());
    }
}
