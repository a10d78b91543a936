//! CareAssist core — the symptom-to-condition inference engine and the
//! multilingual conversation orchestration pipeline behind the chat
//! feature. The host shell renders messages; this crate decides their
//! content.

pub mod catalog;
pub mod config;
pub mod inference;
pub mod locale;
pub mod models;
pub mod orchestrator;
pub mod prefs;
pub mod providers;
pub mod speech;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for hosts that don't install their own subscriber.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} core starting v{}", config::APP_NAME, config::APP_VERSION);
}
