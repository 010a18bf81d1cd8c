//! Tracing setup for hosts embedding the editor.
//!
//! # Usage
//!
//! ```ignore
//! use magic_editor_common::telemetry::{self, TelemetryConfig};
//!
//! fn main() {
//!     telemetry::init(TelemetryConfig::from_env("magic-editor"));
//!     tracing::info!("editor started");
//! }
//! ```

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::EditorConfig;

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Build config from the build profile.
    ///
    /// `RUST_LOG` still overrides `console_level` at init time.
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        Self {
            service_name: service_name.into(),
            console_level,
        }
    }

    /// Take the console level from an editor config, falling back to INFO
    /// when the configured level doesn't parse.
    pub fn from_editor_config(service_name: impl Into<String>, config: &EditorConfig) -> Self {
        Self {
            service_name: service_name.into(),
            console_level: config.log_level.parse().unwrap_or(Level::INFO),
        }
    }
}

/// Initialize tracing with a compact console layer.
///
/// Call once at application startup. Later calls are ignored.
pub fn init(config: TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.console_level.as_str().to_lowercase())
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(service = %config.service_name, "telemetry initialized");
    }
}
