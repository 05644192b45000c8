//! Catalogue orchestration service.
//!
//! Implements the exposed contract over the [`CatalogueSource`] port: full
//! aggregated listings of characters and combat styles, and single-character
//! resolution by exactly one of id or name.

use std::sync::Arc;

use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::ports::{
    CatalogueSource, CatalogueSourceError, Character, CharacterQuery, CharacterSummary,
    CombatStyle,
};

mod paginate;

use paginate::collect_catalogue;

const FIRST_PAGE: u32 = 1;

/// Read-only catalogue facade consumed by the inbound HTTP adapter.
///
/// Stateless between calls: every request builds its result from scratch and
/// the only shared state is the injected source's immutable configuration.
pub struct CatalogueService {
    source: Arc<dyn CatalogueSource>,
}

impl CatalogueService {
    /// Build a service over the given source.
    pub fn new(source: Arc<dyn CatalogueSource>) -> Self {
        Self { source }
    }

    /// List every character, sorted ascending by identifier.
    ///
    /// Page 1 is load-bearing: any failure there, or an empty first page,
    /// fails the whole call as not-found. Later pages are best-effort.
    ///
    /// # Errors
    ///
    /// Returns a not-found [`DomainError`] when the character collection is
    /// empty or its first page cannot be fetched.
    pub async fn list_characters(&self) -> Result<Vec<CharacterSummary>, DomainError> {
        let first_page = self
            .source
            .character_page(FIRST_PAGE)
            .await
            .map_err(|error| {
                warn!(%error, "first character page failed");
                DomainError::not_found("No characters found")
            })?;
        if first_page.items.is_empty() {
            return Err(DomainError::not_found("No characters found"));
        }
        Ok(collect_catalogue(first_page, |page| self.source.character_page(page)).await)
    }

    /// List every combat style, sorted ascending by identifier.
    ///
    /// # Errors
    ///
    /// Returns a not-found [`DomainError`] when the combat-style collection
    /// is empty or its first page cannot be fetched.
    pub async fn list_combat_styles(&self) -> Result<Vec<CombatStyle>, DomainError> {
        let first_page = self
            .source
            .combat_style_page(FIRST_PAGE)
            .await
            .map_err(|error| {
                warn!(%error, "first combat style page failed");
                DomainError::not_found("No combat styles found")
            })?;
        if first_page.items.is_empty() {
            return Err(DomainError::not_found("No combat styles found"));
        }
        Ok(collect_catalogue(first_page, |page| self.source.combat_style_page(page)).await)
    }

    /// Resolve a single character by exactly one of `id` or `name`.
    ///
    /// Input is validated before any network call; when both selectors are
    /// supplied the id wins silently. The not-found message template always
    /// names `id`, even for name lookups, to stay compatible with existing
    /// clients.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for unusable input, a not-found
    /// error when the lookup matches nothing, and an upstream error
    /// (provider status forwarded verbatim) when the provider rejects the
    /// call.
    pub async fn find_character(
        &self,
        id: Option<i64>,
        name: Option<&str>,
    ) -> Result<Character, DomainError> {
        let query = CharacterQuery::from_parts(id, name)?;
        let matches = self
            .source
            .find_characters(&query)
            .await
            .map_err(map_lookup_error)?;
        matches.into_iter().next().ok_or_else(|| {
            DomainError::not_found(format!("Character with id {query} not found."))
        })
    }
}

fn map_lookup_error(error: CatalogueSourceError) -> DomainError {
    match error {
        CatalogueSourceError::Upstream { status, message } => {
            DomainError::upstream(status, message)
        }
        CatalogueSourceError::Timeout { .. }
        | CatalogueSourceError::Transport { .. }
        | CatalogueSourceError::Decode { .. } => {
            warn!(%error, "character lookup failed before an upstream answer");
            DomainError::internal(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests;
