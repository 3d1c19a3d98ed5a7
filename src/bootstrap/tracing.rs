//! Tracing configuration for the Stepwise host
//!
//! Installs a stderr fmt layer plus, when a log directory is configured, a
//! non-blocking file layer. `RUST_LOG` overrides the default directives.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

pub const LOG_FILE_NAME: &str = "stepwise.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug for the wizard crates
/// - **Production**: info everywhere
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        "info".to_string(),
        format!("stepwise={level}"),
        format!("stepwise_lib={level}"),
        format!("sw_core={level}"),
        format!("sw_app={level}"),
        format!("sw_infra={level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once, before the wizard is built. An empty `log_dir` disables file
/// logging; a log directory that cannot be created falls back to stderr only.
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: &Path) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    // stderr keeps log lines out of the interactive prompt on stdout
    let console_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = if log_dir.as_os_str().is_empty() {
        None
    } else {
        match build_file_writer(log_dir) {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
                None
            }
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(console_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"sw_core=debug".to_string()));
        assert!(dev_directives.contains(&"stepwise=debug".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"sw_infra=info".to_string()));
        assert!(!prod_directives.iter().any(|d| d.ends_with("=debug")));
    }

    #[test]
    fn test_build_file_writer_creates_log_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("nested/logs");

        // the guard can only be set once per process, so only the directory
        // side effect is checked here
        let _ = build_file_writer(&log_dir);

        assert!(log_dir.is_dir());
    }
}
