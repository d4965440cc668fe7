pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod schemas;

#[cfg(test)]
mod test_support;

use crate::api::routes::Application;
use crate::core::{config::Settings, telemetry};

/// Serves the LMS router aggregator.
pub async fn run() -> anyhow::Result<()> {
    serve("fastlms", api::lms::application).await
}

/// Serves the items demo API.
pub async fn run_items() -> anyhow::Result<()> {
    serve("items", api::items::application).await
}

async fn serve(
    service: &'static str,
    build: fn() -> Result<Application, api::routes::MountError>,
) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let application = build()?;
    let title = application.metadata().title.clone();
    let routes = application.entries().count();

    let listener = tokio::net::TcpListener::bind(settings.server_addr()).await?;
    tracing::info!(
        service,
        title = %title,
        routes,
        host = %settings.server_host(),
        port = settings.server_port(),
        environment = %settings.runtime().environment.as_str(),
        "API listening"
    );

    let app = api::router::router(application, settings);
    axum::serve(listener, app)
        .with_graceful_shutdown(core::shutdown::shutdown_signal(service))
        .await?;

    tracing::info!(service, "server stopped");
    Ok(())
}
