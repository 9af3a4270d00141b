use std::io::Write;
use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "kindle_engine=debug,wgpu=warn"). When unset, `RUST_LOG` is consulted before
/// falling back to `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,

    /// Prefix each line with the emitting thread's name, so update-thread and
    /// render-thread output can be told apart.
    pub thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            thread_names: true,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. If another logger was installed first, it is
/// left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        builder.write_style(config.write_style);

        if config.thread_names {
            builder.format(|buf, record| {
                let thread = std::thread::current();
                writeln!(
                    buf,
                    "[{} {:<5} {} ({})] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    thread.name().unwrap_or("unnamed"),
                    record.args()
                )
            });
        }

        if builder.try_init().is_err() {
            log::warn!("a logger was already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}
