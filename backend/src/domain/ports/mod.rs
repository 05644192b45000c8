//! Driven ports owned by the domain.

mod catalogue_source;

pub use catalogue_source::{
    Affiliation, CataloguePage, CatalogueSource, CatalogueSourceError, Character, CharacterQuery,
    CharacterSummary, CombatStyle, FixtureCatalogueSource, Identified, PageMeta,
};

#[cfg(test)]
pub(crate) use catalogue_source::MockCatalogueSource;
