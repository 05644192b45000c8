//! Driven port for fetching catalogue data from the upstream provider.
//!
//! The domain owns the page and item shapes so the aggregation service stays
//! adapter-agnostic; the HTTP adapter decodes wire envelopes into these types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Anything exposing the upstream integer identifier.
///
/// Aggregated collections are sorted by this value, nothing else about an
/// item matters to the engine.
pub trait Identified {
    /// Upstream-assigned identifier.
    fn id(&self) -> i64;
}

/// Current/total page counters describing a paged resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Page number this envelope describes, 1-based.
    pub current_page: u32,
    /// Total number of pages the upstream reports for the resource.
    pub total_pages: u32,
}

impl PageMeta {
    /// Whether a page after the current one exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page + 1 <= self.total_pages
    }

    /// Number of the page after the current one.
    ///
    /// # Panics
    ///
    /// Panics when [`PageMeta::has_next`] is false; asking for a page past
    /// the end is a programming error, not a recoverable condition.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        assert!(self.has_next(), "no next page available");
        self.current_page + 1
    }
}

/// One upstream response unit: a slice of items plus pagination counters.
#[derive(Debug, Clone, PartialEq)]
pub struct CataloguePage<T> {
    /// Pagination counters for this slice.
    pub meta: PageMeta,
    /// Items carried by this page, in upstream order.
    pub items: Vec<T>,
}

/// Character list entry returned by the paginated characters resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CharacterSummary {
    /// Upstream identifier.
    pub id: i64,
    /// Character's full name.
    pub name: String,
    /// Gender as reported upstream.
    pub gender: Option<String>,
    /// Race (Human, Demon, ...).
    pub race: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Character image URL.
    pub img: Option<String>,
}

/// One combat style (Water Breathing, Sun Breathing, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CombatStyle {
    /// Upstream identifier.
    pub id: i64,
    /// Combat style name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// Faction a character belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Affiliation {
    /// Affiliation name (Demon Slayer Corps, Hashira, ...).
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Full character detail returned by single-character lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Character {
    /// Upstream identifier.
    pub id: i64,
    /// Character's full name.
    pub name: String,
    /// Gender as reported upstream.
    pub gender: Option<String>,
    /// Race (Human, Demon, ...).
    pub race: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Character image URL.
    pub img: Option<String>,
    /// Faction the character belongs to.
    pub affiliation: Option<Affiliation>,
    /// Combat styles mastered by the character. The upstream wire key is
    /// `combat_style`, singular.
    #[serde(rename(deserialize = "combat_style"), default)]
    pub combat_styles: Vec<CombatStyle>,
}

impl Identified for CharacterSummary {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for CombatStyle {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Selector for a single-character lookup: exactly one of id or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterQuery {
    /// Lookup by upstream identifier.
    Id(i64),
    /// Lookup by exact character name.
    Name(String),
}

impl CharacterQuery {
    /// Validate the raw caller input into a query.
    ///
    /// When both an id and a non-blank name are supplied, the id wins
    /// silently; neither, or a blank name alone, is rejected before any
    /// network call.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`DomainError`] when no usable selector is
    /// present.
    pub fn from_parts(id: Option<i64>, name: Option<&str>) -> Result<Self, DomainError> {
        if let Some(id) = id {
            return Ok(Self::Id(id));
        }
        name.filter(|name| !name.trim().is_empty())
            .map(|name| Self::Name(name.to_owned()))
            .ok_or_else(|| DomainError::invalid_request("Provide exactly one of 'id' or 'name'"))
    }
}

impl std::fmt::Display for CharacterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Errors surfaced while calling the upstream catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueSourceError {
    /// The upstream answered with a 4xx/5xx status; `message` is extracted
    /// from its error body and `status` forwarded verbatim.
    #[error("upstream catalogue error ({status}): {message}")]
    Upstream {
        /// Literal status code the upstream answered with.
        status: u16,
        /// Message extracted from the upstream error body.
        message: String,
    },
    /// The request hit the client-side timeout.
    #[error("catalogue request timed out: {message}")]
    Timeout {
        /// Transport-level detail.
        message: String,
    },
    /// Network transport failed before receiving a response.
    #[error("catalogue transport failed: {message}")]
    Transport {
        /// Transport-level detail.
        message: String,
    },
    /// A 2xx response body could not be decoded into the expected envelope.
    #[error("catalogue response decode failed: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },
}

impl CatalogueSourceError {
    /// Build an [`CatalogueSourceError::Upstream`] error.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Build a [`CatalogueSourceError::Timeout`] error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build a [`CatalogueSourceError::Transport`] error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`CatalogueSourceError::Decode`] error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching catalogue pages and single characters upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Fetch one page of the character-summary resource.
    async fn character_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CharacterSummary>, CatalogueSourceError>;

    /// Fetch one page of the combat-style resource.
    async fn combat_style_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CombatStyle>, CatalogueSourceError>;

    /// Look up characters matching the query; the upstream answers with a
    /// list-wrapped envelope even for exact-id lookups.
    async fn find_characters(
        &self,
        query: &CharacterQuery,
    ) -> Result<Vec<Character>, CatalogueSourceError>;
}

/// Fixture source with a small canned catalogue, for tests and examples.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalogueSource;

impl FixtureCatalogueSource {
    fn tanjiro() -> Character {
        Character {
            id: 1,
            name: "Tanjiro Kamado".to_owned(),
            gender: Some("Male".to_owned()),
            race: Some("Human".to_owned()),
            description: Some("A kind-hearted demon slayer.".to_owned()),
            img: None,
            affiliation: Some(Affiliation {
                name: Some("Demon Slayer Corps".to_owned()),
                description: None,
            }),
            combat_styles: vec![CombatStyle {
                id: 1,
                name: "Water Breathing".to_owned(),
                description: None,
            }],
        }
    }
}

#[async_trait]
impl CatalogueSource for FixtureCatalogueSource {
    async fn character_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CharacterSummary>, CatalogueSourceError> {
        let items = if page == 1 {
            vec![
                CharacterSummary {
                    id: 2,
                    name: "Nezuko Kamado".to_owned(),
                    gender: Some("Female".to_owned()),
                    race: Some("Demon".to_owned()),
                    description: None,
                    img: None,
                },
                CharacterSummary {
                    id: 1,
                    name: "Tanjiro Kamado".to_owned(),
                    gender: Some("Male".to_owned()),
                    race: Some("Human".to_owned()),
                    description: None,
                    img: None,
                },
            ]
        } else {
            Vec::new()
        };
        Ok(CataloguePage {
            meta: PageMeta {
                current_page: page,
                total_pages: 1,
            },
            items,
        })
    }

    async fn combat_style_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CombatStyle>, CatalogueSourceError> {
        let items = if page == 1 {
            vec![CombatStyle {
                id: 1,
                name: "Water Breathing".to_owned(),
                description: Some("Flowing strikes mirroring water.".to_owned()),
            }]
        } else {
            Vec::new()
        };
        Ok(CataloguePage {
            meta: PageMeta {
                current_page: page,
                total_pages: 1,
            },
            items,
        })
    }

    async fn find_characters(
        &self,
        query: &CharacterQuery,
    ) -> Result<Vec<Character>, CatalogueSourceError> {
        let matches = match query {
            CharacterQuery::Id(1) => vec![Self::tanjiro()],
            CharacterQuery::Name(name) if name == "Tanjiro Kamado" => vec![Self::tanjiro()],
            _ => Vec::new(),
        };
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page counters and query validation.

    use super::*;

    #[test]
    fn has_next_holds_strictly_before_the_last_page() {
        let meta = PageMeta {
            current_page: 2,
            total_pages: 3,
        };
        assert!(meta.has_next());
        assert_eq!(meta.next_page(), 3);
    }

    #[test]
    fn has_next_is_false_on_the_last_page() {
        let meta = PageMeta {
            current_page: 3,
            total_pages: 3,
        };
        assert!(!meta.has_next());
    }

    #[test]
    #[should_panic(expected = "no next page available")]
    fn next_page_past_the_end_is_a_programming_error() {
        let meta = PageMeta {
            current_page: 1,
            total_pages: 1,
        };
        let _ = meta.next_page();
    }

    #[test]
    fn query_prefers_id_when_both_selectors_are_given() {
        let query = CharacterQuery::from_parts(Some(7), Some("Tanjiro Kamado"))
            .expect("id alone is a valid selector");
        assert_eq!(query, CharacterQuery::Id(7));
    }

    #[test]
    fn query_rejects_missing_and_blank_selectors() {
        assert!(CharacterQuery::from_parts(None, None).is_err());
        assert!(CharacterQuery::from_parts(None, Some("")).is_err());
        assert!(CharacterQuery::from_parts(None, Some("   ")).is_err());
    }

    #[test]
    fn query_display_renders_the_selector_value() {
        assert_eq!(CharacterQuery::Id(7).to_string(), "7");
        assert_eq!(
            CharacterQuery::Name("Tanjiro Kamado".to_owned()).to_string(),
            "Tanjiro Kamado"
        );
    }
}
