use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Directives appended when no explicit filter is given; the windowing crates
/// are chatty at `info`.
const QUIET_PLATFORM: &str = "winit=warn,glutin=warn";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `debug` or `gldemo_renderer=trace`.
    /// Falls back to `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: WriteStyle::Auto }
    }
}

impl LoggingConfig {
    fn builder(&self) -> Builder {
        let mut builder = Builder::new();
        match self.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LevelFilter::Info).parse_filters(QUIET_PLATFORM);
            }
        }
        builder.write_style(self.write_style);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logger installed ({:?})", config.env_filter);
        }
    });
}
