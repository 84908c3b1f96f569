use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_ENV: &str = "TF_LOG_DIR";
pub const LOG_BACKTRACE_ENV: &str = "TF_LOG_INCLUDE_BACKTRACE";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where log lines go and how panics are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// `Some(dir)` writes `<dir>/<app>.log` with daily rotation instead of stderr.
    pub log_dir: Option<PathBuf>,
    /// Also run the default panic hook (prints a backtrace when enabled).
    pub include_backtrace: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self {
            log_dir: std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            include_backtrace: std::env::var(LOG_BACKTRACE_ENV)
                .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

/// Routes panics through `tracing::error!`. Installed once per process.
pub fn install_tracing_panic_hook(app_name: &'static str, include_backtrace: bool) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(
                application = app_name,
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn file_writer(app_name: &'static str, dir: PathBuf) -> Option<BoxMakeWriter> {
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create {LOG_DIR_ENV} {}: {err}; logging to stderr", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Installs the global subscriber (`RUST_LOG` filter, default `info`) and the panic hook.
///
/// Log lines go to stderr so command output on stdout stays machine-readable.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing_subscriber(app_name: &'static str, settings: LogSettings) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let writer = settings
        .log_dir
        .and_then(|dir| file_writer(app_name, dir))
        .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));
    let _ = builder.with_writer(writer).try_init();

    install_tracing_panic_hook(app_name, settings.include_backtrace);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_log_to_stderr() {
        let settings = LogSettings::default();
        assert!(settings.log_dir.is_none());
        assert!(!settings.include_backtrace);
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            log_dir: Some(dir.path().join("logs")),
            include_backtrace: true,
        };

        init_tracing_subscriber("tf-common-test", settings.clone());
        init_tracing_subscriber("tf-common-test", settings);
        tracing::info!("logging initialised twice");

        assert!(dir.path().join("logs").is_dir());
    }
}
