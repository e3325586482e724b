//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to this
/// crate and to `tower_http`. Format is `json` or anything else for pretty
/// output. Events go to stderr so stdout stays clean for CLI output.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rentify={level},tower_http={level}",
            level = config.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
