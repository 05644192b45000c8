//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::ApiError;
use crate::domain::ports::{Affiliation, Character, CharacterSummary, CombatStyle};

/// Top-level OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Demon Slayer catalogue gateway",
        description = "Read-only gateway aggregating the paginated public Demon Slayer API into complete, sorted listings."
    ),
    paths(
        crate::api::characters::list_characters,
        crate::api::characters::search_character,
        crate::api::characters::character_by_id,
        crate::api::combat_styles::list_combat_styles,
        crate::api::health::ready,
        crate::api::health::live
    ),
    components(schemas(CharacterSummary, Character, Affiliation, CombatStyle, ApiError)),
    tags(
        (name = "characters", description = "Aggregated character catalogue"),
        (name = "combat-styles", description = "Aggregated combat style catalogue"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
