//! Service entry point: tracing, configuration, and the HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::api::health::HealthState;
use backend::domain::CatalogueService;
use backend::outbound::demonslayer::DemonSlayerHttpSource;
use backend::server::{ServerConfig, UpstreamConfig, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "failed to initialise tracing");
    }

    let upstream_config = UpstreamConfig::from_env().map_err(std::io::Error::other)?;
    let server_config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let source = DemonSlayerHttpSource::new(&upstream_config).map_err(std::io::Error::other)?;
    let service = web::Data::new(CatalogueService::new(Arc::new(source)));
    let health = web::Data::new(HealthState::new());

    let app_health = health.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(service.clone())
            .app_data(app_health.clone())
            .configure(configure_routes);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(server_config.bind_addr)?;

    health.mark_ready();
    info!(addr = %server_config.bind_addr, "listening");

    let result = server.run().await;
    if result.is_err() {
        health.mark_unhealthy();
        warn!("server terminated with an error");
    }
    result
}
