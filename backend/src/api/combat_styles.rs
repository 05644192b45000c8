//! Combat style API handlers.

use actix_web::{get, web};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::CatalogueService;
use crate::domain::ports::CombatStyle;

/// List every combat style, aggregated across all upstream pages and sorted
/// by ascending identifier.
#[utoipa::path(
    get,
    path = "/api/combat-styles",
    responses(
        (status = 200, description = "Combat styles sorted by ascending identifier", body = [CombatStyle]),
        (status = 404, description = "No combat styles found", body = ApiError)
    ),
    tags = ["combat-styles"],
    operation_id = "listCombatStyles"
)]
#[get("/combat-styles")]
pub async fn list_combat_styles(
    service: web::Data<CatalogueService>,
) -> ApiResult<web::Json<Vec<CombatStyle>>> {
    Ok(web::Json(service.list_combat_styles().await?))
}
