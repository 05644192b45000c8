//! Outbound adapter for the public Demon Slayer API.

mod dto;
mod http_source;

pub use http_source::{DemonSlayerHttpSource, DemonSlayerSourceInitError};
