pub mod config;
pub mod knowledge;
pub mod models;
pub mod pipeline;
pub mod recommendation;
pub mod service;

pub use service::{MediGuide, ReportBundle};

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` wins over the built-in filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
