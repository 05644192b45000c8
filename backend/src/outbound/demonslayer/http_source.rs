//! Reqwest-backed Demon Slayer catalogue adapter.
//!
//! This adapter owns transport details only: request building, the fixed
//! upstream page size, HTTP error translation, and JSON decoding into the
//! domain page shape.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto::{LookupEnvelopeDto, PageEnvelopeDto};
use crate::domain::ports::{
    CataloguePage, CatalogueSource, CatalogueSourceError, Character, CharacterQuery,
    CharacterSummary, CombatStyle,
};
use crate::server::UpstreamConfig;

/// Page size fixed by contract with the upstream API, not configurable.
const PAGE_SIZE: u32 = 10;

const UNKNOWN_ERROR: &str = "Unknown error";
const UNKNOWN_ERROR_INVALID_JSON: &str = "Unknown error (invalid JSON response)";

/// Failures constructing the adapter from configuration.
#[derive(Debug, thiserror::Error)]
pub enum DemonSlayerSourceInitError {
    /// The reqwest client could not be built.
    #[error("failed to build the upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// An endpoint path did not combine with the base URL.
    #[error("invalid upstream endpoint {endpoint:?}: {source}")]
    EndpointUrl {
        /// Offending endpoint path.
        endpoint: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },
}

/// Catalogue source performing HTTP GET requests against the public
/// Demon Slayer API.
///
/// Holds only immutable, process-wide client configuration; safe for
/// unsynchronised concurrent use by every fetch call.
pub struct DemonSlayerHttpSource {
    client: Client,
    character_url: Url,
    combat_style_url: Url,
}

impl DemonSlayerHttpSource {
    /// Build an adapter from upstream configuration. The configured request
    /// timeout applies client-wide; per-page deadlines are the aggregator's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or an
    /// endpoint path does not form a valid URL.
    pub fn new(config: &UpstreamConfig) -> Result<Self, DemonSlayerSourceInitError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            character_url: endpoint_url(&config.base_url, &config.character_endpoint)?,
            combat_style_url: endpoint_url(&config.base_url, &config.combat_style_endpoint)?,
        })
    }

    fn page_request(&self, url: &Url, page: u32) -> reqwest::RequestBuilder {
        self.client
            .get(url.clone())
            .query(&[("page", page), ("limit", PAGE_SIZE)])
    }

    fn lookup_request(&self, query: &CharacterQuery) -> reqwest::RequestBuilder {
        let request = self.client.get(self.character_url.clone());
        match query {
            CharacterQuery::Id(id) => request.query(&[("id", *id)]),
            CharacterQuery::Name(name) => request.query(&[("name", name.as_str())]),
        }
    }

    async fn fetch_page<T>(
        &self,
        url: &Url,
        page: u32,
    ) -> Result<CataloguePage<T>, CatalogueSourceError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .page_request(url, page)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(translate_error_body(status, body.as_ref()));
        }
        decode_page(body.as_ref(), page)
    }
}

#[async_trait]
impl CatalogueSource for DemonSlayerHttpSource {
    async fn character_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CharacterSummary>, CatalogueSourceError> {
        self.fetch_page(&self.character_url, page).await
    }

    async fn combat_style_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CombatStyle>, CatalogueSourceError> {
        self.fetch_page(&self.combat_style_url, page).await
    }

    async fn find_characters(
        &self,
        query: &CharacterQuery,
    ) -> Result<Vec<Character>, CatalogueSourceError> {
        let response = self
            .lookup_request(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(translate_error_body(status, body.as_ref()));
        }
        decode_lookup(body.as_ref())
    }
}

fn endpoint_url(base_url: &Url, endpoint: &str) -> Result<Url, DemonSlayerSourceInitError> {
    // The base URL carries a path prefix ("/api/v1"), so endpoints are
    // appended textually rather than joined as absolute paths.
    let joined = format!("{}{endpoint}", base_url.as_str().trim_end_matches('/'));
    Url::parse(&joined).map_err(|source| DemonSlayerSourceInitError::EndpointUrl {
        endpoint: endpoint.to_owned(),
        source,
    })
}

fn decode_page<T>(body: &[u8], requested_page: u32) -> Result<CataloguePage<T>, CatalogueSourceError>
where
    T: DeserializeOwned,
{
    let envelope: PageEnvelopeDto<T> = serde_json::from_slice(body).map_err(|error| {
        CatalogueSourceError::decode(format!("invalid catalogue page payload: {error}"))
    })?;
    Ok(envelope.into_page(requested_page))
}

fn decode_lookup(body: &[u8]) -> Result<Vec<Character>, CatalogueSourceError> {
    let envelope: LookupEnvelopeDto<Character> = serde_json::from_slice(body).map_err(|error| {
        CatalogueSourceError::decode(format!("invalid character lookup payload: {error}"))
    })?;
    Ok(envelope.content.unwrap_or_default())
}

fn map_transport_error(error: reqwest::Error) -> CatalogueSourceError {
    if error.is_timeout() {
        CatalogueSourceError::timeout(error.to_string())
    } else {
        CatalogueSourceError::transport(error.to_string())
    }
}

/// Translate an upstream 4xx/5xx response into a source error.
///
/// The upstream reports failures as `{ "error": { "status", "message" } }`;
/// the nested message is extracted when present, and the literal status is
/// always carried regardless of what the body contained.
fn translate_error_body(status: StatusCode, body: &[u8]) -> CatalogueSourceError {
    let message = match serde_json::from_slice::<Value>(body) {
        // A non-string message node counts as absent.
        Ok(value) => value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map_or_else(|| UNKNOWN_ERROR.to_owned(), str::to_owned),
        Err(_) => UNKNOWN_ERROR_INVALID_JSON.to_owned(),
    };
    CatalogueSourceError::upstream(status.as_u16(), message)
}
