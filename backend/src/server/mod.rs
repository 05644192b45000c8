//! HTTP server assembly: configuration types and route registration.

mod config;

pub use config::{ConfigError, ServerConfig, UpstreamConfig};

use actix_web::web;

use crate::api::{characters, combat_styles, health};

/// Register every route the service exposes.
///
/// `/characters/search` must be registered before `/characters/{id}` so the
/// literal segment wins over the path parameter.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(characters::list_characters)
            .service(characters::search_character)
            .service(characters::character_by_id)
            .service(combat_styles::list_combat_styles),
    )
    .service(health::ready)
    .service(health::live);
}
