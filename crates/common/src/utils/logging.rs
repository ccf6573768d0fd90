use std::{env, io};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber, picking the output format from the
/// `LOG_FORMAT` env var (`json` for structured output, compact otherwise).
pub fn init_logging() {
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Defaults to `info`, with the award workflow at debug so state
/// transitions stay visible in container logs.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,service::award=debug"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(|| io::stdout())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // try_init swallows the already-set error, so both paths are callable
    // in either order within one process.
    #[test]
    fn format_switch_initializes_without_panicking() {
        env::set_var("LOG_FORMAT", "json");
        init_logging();
        env::set_var("LOG_FORMAT", "compact");
        init_logging();
        env::remove_var("LOG_FORMAT");
        init_logging();
    }
}
