//! Read-only gateway over the public Demon Slayer API.
//!
//! The upstream API serves its catalogue in pages of ten. This service
//! fetches every page concurrently, merges the results into one listing
//! sorted by ascending identifier, and re-exposes them together with a
//! single-character lookup. Upstream failures surface as a small JSON error
//! envelope with the upstream status forwarded verbatim.
//!
//! The crate is split hexagonally: [`domain`] holds the aggregation and
//! lookup logic behind a source port, [`outbound`] implements that port over
//! HTTP, and [`api`] exposes the inbound REST surface.

pub mod api;
pub mod doc;
pub mod domain;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
