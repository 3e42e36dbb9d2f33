//! Shared logging utilities for consistent tracing across the catalog crates

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::types::Component;

/// Filter directives for a base level, scoped to the workspace crates
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!(
        "catalog={base_level},shared={base_level},webserver={base_level},tower_http=debug,reqwest=warn"
    )
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over the computed directives.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    // try_init so repeated initialization in tests is harmless
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            timestamp = %$crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            timestamp = %$crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            timestamp = %$crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            timestamp = %$crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

pub fn log_startup(component: Component, details: &str) {
    info!(
        component = %component,
        timestamp = %format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

pub fn log_shutdown(component: Component, reason: &str) {
    info!(
        component = %component,
        timestamp = %format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

pub fn log_error(component: Component, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        timestamp = %format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

pub fn log_success(component: Component, message: &str) {
    info!(
        component = %component,
        timestamp = %format_timestamp(),
        "✅ {}",
        message
    );
}

pub fn log_progress(component: Component, action: &str, details: &str) {
    info!(
        component = %component,
        timestamp = %format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_display() {
        assert_eq!(Component::Refresh.to_string(), "refresh");
        assert_eq!(Component::WebServer.to_string(), "webserver");
    }

    #[test]
    fn test_filter_directives_use_base_level() {
        let directives = filter_directives(Some("debug"));
        assert!(directives.contains("catalog=debug"));
        assert!(directives.contains("reqwest=warn"));
        assert!(filter_directives(None).contains("shared=info"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = format_timestamp();
        assert_eq!(ts.len(), "00:00:00.000".len());
    }
}
