use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
};
use super::types::{
    ConfigError, CorsSettings, OpenApiSettings, RuntimeSettings, ServerHost, ServerPort,
    ServerSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("APP_HOST", "0.0.0.0");
        let port = env_or_default("APP_PORT", "8000");

        let environment =
            parse_environment(env_optional("APP_ENV").or_else(|| env_optional("ENVIRONMENT")));

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        // Schema exposure is opt-in for production deployments.
        let openapi_enabled = env_optional("OPENAPI_ENABLED")
            .map(|value| parse_bool(&value))
            .unwrap_or(!environment.is_production());
        let openapi_url = env_or_default("OPENAPI_URL", "/openapi.json");

        let log_level = env_or_default("APP_LOG_LEVEL", "info");
        let json = env_optional("APP_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment },
            cors: CorsSettings { origins: cors_origins },
            openapi: OpenApiSettings { enabled: openapi_enabled, url: openapi_url },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn openapi(&self) -> &OpenApiSettings {
        &self.openapi
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.openapi.url.starts_with('/') || self.openapi.url.len() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "OPENAPI_URL",
                value: self.openapi.url.clone(),
            });
        }

        if self.telemetry.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "APP_LOG_LEVEL",
                value: String::from("<empty>"),
            });
        }

        Ok(())
    }
}
