//! Telemetry initialization - tracing subscriber and panic reporting.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LogLevel};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Default level when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// Service name attached to the startup event.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            level: LogLevel::Info,
            service_name: "idea-board-api".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            json_logs: config.environment.is_production(),
            level: config.log_level,
            ..Self::default()
        }
    }

    fn default_filter(&self) -> String {
        let level = self.level.as_str();
        format!("{level},api_server={level},idea_infra={level},migration={level}")
    }
}

/// Initialize the global tracing subscriber and the panic hook.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    install_panic_hook();

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        level = config.level.as_str(),
        "Telemetry initialized"
    );
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());

        tracing::error!(%location, panic = %payload, "Unhandled panic");
    }));
}
