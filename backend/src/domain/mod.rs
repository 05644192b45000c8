//! Transport-agnostic core: the aggregation service, its driven port, and
//! the domain error type.

pub mod catalogue;
pub mod error;
pub mod ports;

pub use catalogue::CatalogueService;
pub use error::{DomainError, ErrorCode};
