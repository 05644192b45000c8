//! DTOs for decoding Demon Slayer API responses.
//!
//! The adapter decodes into these transport envelopes first, then maps into
//! the domain page shape in one pass. Unknown fields are ignored so upstream
//! additions never break decoding.

use serde::Deserialize;

use crate::domain::ports::{CataloguePage, PageMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PageEnvelopeDto<T> {
    pub(super) pagination: Option<PaginationDto>,
    pub(super) content: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaginationDto {
    pub(super) current_page: u32,
    pub(super) total_pages: u32,
}

/// Lookup responses reuse the page envelope shape without pagination.
#[derive(Debug, Deserialize)]
pub(super) struct LookupEnvelopeDto<T> {
    pub(super) content: Option<Vec<T>>,
}

impl<T> PageEnvelopeDto<T> {
    /// Map into the domain page. An envelope without pagination counters is
    /// treated as the only page of the resource, so aggregation degrades to
    /// the items actually received.
    pub(super) fn into_page(self, requested_page: u32) -> CataloguePage<T> {
        let meta = self.pagination.map_or(
            PageMeta {
                current_page: requested_page,
                total_pages: requested_page,
            },
            |pagination| PageMeta {
                current_page: pagination.current_page,
                total_pages: pagination.total_pages,
            },
        );
        CataloguePage {
            meta,
            items: self.content.unwrap_or_default(),
        }
    }
}
