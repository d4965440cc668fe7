use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// Installs the global subscriber. `RUST_LOG` wins over `APP_LOG_LEVEL`.
pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok(), &settings.telemetry().log_level)?;
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(fmt::format::FmtSpan::CLOSE);

    let installed =
        if settings.telemetry().json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|err| anyhow::anyhow!(err.to_string()))
}

fn build_filter(rust_log: Option<String>, fallback: &str) -> anyhow::Result<EnvFilter> {
    match rust_log.filter(|value| !value.trim().is_empty()) {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_new(fallback)?),
    }
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn rust_log_overrides_fallback() {
        let filter = build_filter(Some("debug".to_string()), "info").expect("filter");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn blank_rust_log_uses_fallback() {
        let filter = build_filter(Some("  ".to_string()), "warn").expect("filter");
        assert_eq!(filter.to_string(), "warn");
    }
}
