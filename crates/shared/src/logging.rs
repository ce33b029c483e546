use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, LoggingConfig};

const QUIET_DEPENDENCIES: &str = "hyper=warn,reqwest=warn";

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` overrides the configured level when set. Fails if a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(&config.level);

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let fmt_layer = match config.format {
        LogFormat::Json => fmt_layer
            .with_file(true)
            .with_line_number(true)
            .json()
            .boxed(),
        LogFormat::Pretty => fmt_layer.pretty().boxed(),
        LogFormat::Compact => fmt_layer.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(format = ?config.format, "Logging initialized");
    Ok(())
}

/// Compact subscriber that writes through the test harness capture.
///
/// Every test may call it; only the first call installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .compact()
        .try_init();
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{}", level, QUIET_DEPENDENCIES)))
}
