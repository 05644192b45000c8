//! Character API handlers.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::CatalogueService;
use crate::domain::ports::{Character, CharacterSummary};

/// Query parameters accepted by the character search endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CharacterSearchQuery {
    /// Upstream character identifier; wins silently when both are given.
    id: Option<i64>,
    /// Exact character name.
    name: Option<String>,
}

/// List every character, aggregated across all upstream pages and sorted by
/// ascending identifier.
#[utoipa::path(
    get,
    path = "/api/characters",
    responses(
        (status = 200, description = "Characters sorted by ascending identifier", body = [CharacterSummary]),
        (status = 404, description = "No characters found", body = ApiError)
    ),
    tags = ["characters"],
    operation_id = "listCharacters"
)]
#[get("/characters")]
pub async fn list_characters(
    service: web::Data<CatalogueService>,
) -> ApiResult<web::Json<Vec<CharacterSummary>>> {
    Ok(web::Json(service.list_characters().await?))
}

/// Find one character by exactly one of `id` or `name`.
#[utoipa::path(
    get,
    path = "/api/characters/search",
    params(CharacterSearchQuery),
    responses(
        (status = 200, description = "First matching character", body = Character),
        (status = 400, description = "Neither or both selectors usable", body = ApiError),
        (status = 404, description = "No matching character", body = ApiError)
    ),
    tags = ["characters"],
    operation_id = "searchCharacter"
)]
#[get("/characters/search")]
pub async fn search_character(
    service: web::Data<CatalogueService>,
    query: web::Query<CharacterSearchQuery>,
) -> ApiResult<web::Json<Character>> {
    let found = service
        .find_character(query.id, query.name.as_deref())
        .await?;
    Ok(web::Json(found))
}

/// Find one character by its upstream identifier.
#[utoipa::path(
    get,
    path = "/api/characters/{id}",
    params(("id" = i64, Path, description = "Upstream character identifier")),
    responses(
        (status = 200, description = "Matching character", body = Character),
        (status = 404, description = "No matching character", body = ApiError)
    ),
    tags = ["characters"],
    operation_id = "getCharacterById"
)]
#[get("/characters/{id}")]
pub async fn character_by_id(
    service: web::Data<CatalogueService>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<Character>> {
    let found = service.find_character(Some(id.into_inner()), None).await?;
    Ok(web::Json(found))
}
