//! Behavioural coverage for catalogue aggregation and character resolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future;
use mockall::predicate::eq;
use tokio::time::sleep;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::ports::{CataloguePage, Identified, MockCatalogueSource, PageMeta};

fn summary(id: i64) -> CharacterSummary {
    CharacterSummary {
        id,
        name: format!("Character {id}"),
        gender: None,
        race: None,
        description: None,
        img: None,
    }
}

fn style(id: i64) -> CombatStyle {
    CombatStyle {
        id,
        name: format!("Style {id}"),
        description: None,
    }
}

fn character(id: i64) -> Character {
    Character {
        id,
        name: format!("Character {id}"),
        gender: None,
        race: None,
        description: None,
        img: None,
        affiliation: None,
        combat_styles: Vec::new(),
    }
}

fn page_of<T>(current_page: u32, total_pages: u32, items: Vec<T>) -> CataloguePage<T> {
    CataloguePage {
        meta: PageMeta {
            current_page,
            total_pages,
        },
        items,
    }
}

fn service(source: impl CatalogueSource + 'static) -> CatalogueService {
    CatalogueService::new(Arc::new(source))
}

fn ids<T: Identified>(items: &[T]) -> Vec<i64> {
    items.iter().map(Identified::id).collect()
}

#[tokio::test]
async fn single_page_collection_is_returned_sorted_with_no_further_fetches() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_character_page()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(page_of(1, 1, vec![summary(3), summary(1), summary(2)])));

    let characters = service(source)
        .list_characters()
        .await
        .expect("single page listing succeeds");
    assert_eq!(ids(&characters), vec![1, 2, 3]);
}

#[tokio::test]
async fn multi_page_union_is_sorted_across_pages() {
    let mut source = MockCatalogueSource::new();
    source.expect_character_page().returning(|page| {
        let items = match page {
            1 => vec![summary(5), summary(1)],
            2 => vec![summary(4), summary(2)],
            3 => vec![summary(3), summary(6)],
            _ => Vec::new(),
        };
        Ok(page_of(page, 3, items))
    });

    let characters = service(source)
        .list_characters()
        .await
        .expect("multi page listing succeeds");
    assert_eq!(ids(&characters), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn failed_page_contributes_no_items_and_does_not_fail_the_call() {
    let mut source = MockCatalogueSource::new();
    source.expect_character_page().returning(|page| match page {
        2 => Err(CatalogueSourceError::transport("connection reset")),
        page => Ok(page_of(page, 3, vec![summary(i64::from(page))])),
    });

    let characters = service(source)
        .list_characters()
        .await
        .expect("partial failure is tolerated");
    assert_eq!(ids(&characters), vec![1, 3]);
}

#[tokio::test]
async fn page_one_failure_is_not_found_and_stops_all_fetching() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_character_page()
        .with(eq(1))
        .times(1)
        .returning(|_| Err(CatalogueSourceError::upstream(500, "backend exploded")));

    let error = service(source)
        .list_characters()
        .await
        .expect_err("page 1 failure is fatal");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "No characters found");
}

#[tokio::test]
async fn empty_page_one_is_not_found() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_character_page()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(page_of(1, 4, Vec::new())));

    let error = service(source)
        .list_characters()
        .await
        .expect_err("empty page 1 is fatal");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn combat_styles_aggregate_with_the_same_engine() {
    let mut source = MockCatalogueSource::new();
    source.expect_combat_style_page().returning(|page| {
        let items = match page {
            1 => vec![style(2)],
            2 => vec![style(1)],
            _ => Vec::new(),
        };
        Ok(page_of(page, 2, items))
    });

    let styles = service(source)
        .list_combat_styles()
        .await
        .expect("combat style listing succeeds");
    assert_eq!(ids(&styles), vec![1, 2]);
}

#[tokio::test]
async fn empty_combat_styles_report_their_own_resource_name() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_combat_style_page()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(page_of(1, 1, Vec::new())));

    let error = service(source)
        .list_combat_styles()
        .await
        .expect_err("empty collection is fatal");
    assert_eq!(error.message(), "No combat styles found");
}

#[tokio::test]
async fn repeated_aggregation_is_idempotent() {
    let mut source = MockCatalogueSource::new();
    source.expect_character_page().returning(|page| {
        let items = match page {
            1 => vec![summary(2)],
            2 => vec![summary(1)],
            _ => Vec::new(),
        };
        Ok(page_of(page, 2, items))
    });

    let service = service(source);
    let first = service
        .list_characters()
        .await
        .expect("first listing succeeds");
    let second = service
        .list_characters()
        .await
        .expect("second listing succeeds");
    assert_eq!(first, second);
}

/// Test double recording how many page fetches run concurrently.
struct GaugedSource {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    total_pages: u32,
}

impl GaugedSource {
    fn new(total_pages: u32) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            total_pages,
        }
    }
}

#[async_trait]
impl CatalogueSource for GaugedSource {
    async fn character_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CharacterSummary>, CatalogueSourceError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        sleep(Duration::from_millis(25)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(page_of(
            page,
            self.total_pages,
            vec![summary(i64::from(page))],
        ))
    }

    async fn combat_style_page(
        &self,
        _page: u32,
    ) -> Result<CataloguePage<CombatStyle>, CatalogueSourceError> {
        Err(CatalogueSourceError::transport("not used in this test"))
    }

    async fn find_characters(
        &self,
        _query: &CharacterQuery,
    ) -> Result<Vec<Character>, CatalogueSourceError> {
        Err(CatalogueSourceError::transport("not used in this test"))
    }
}

#[tokio::test(start_paused = true)]
async fn at_most_five_page_fetches_are_in_flight() {
    let source = Arc::new(GaugedSource::new(20));
    let service = CatalogueService::new(Arc::clone(&source) as Arc<dyn CatalogueSource>);

    let characters = service
        .list_characters()
        .await
        .expect("all pages succeed");
    assert_eq!(characters.len(), 20);
    assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 5);
}

/// Test double whose second page never answers.
struct StallingSource;

#[async_trait]
impl CatalogueSource for StallingSource {
    async fn character_page(
        &self,
        page: u32,
    ) -> Result<CataloguePage<CharacterSummary>, CatalogueSourceError> {
        if page == 2 {
            future::pending::<()>().await;
        }
        Ok(page_of(page, 3, vec![summary(i64::from(page))]))
    }

    async fn combat_style_page(
        &self,
        _page: u32,
    ) -> Result<CataloguePage<CombatStyle>, CatalogueSourceError> {
        Err(CatalogueSourceError::transport("not used in this test"))
    }

    async fn find_characters(
        &self,
        _query: &CharacterQuery,
    ) -> Result<Vec<Character>, CatalogueSourceError> {
        Err(CatalogueSourceError::transport("not used in this test"))
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_page_is_swallowed() {
    let characters = service(StallingSource)
        .list_characters()
        .await
        .expect("timeout on one page is tolerated");
    assert_eq!(ids(&characters), vec![1, 3]);
}

#[tokio::test]
async fn resolver_rejects_missing_selectors_before_any_call() {
    // No expectations: any source call would panic the mock.
    let source = MockCatalogueSource::new();
    let error = service(source)
        .find_character(None, None)
        .await
        .expect_err("missing selectors are rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Provide exactly one of 'id' or 'name'");
}

#[tokio::test]
async fn resolver_rejects_blank_name_before_any_call() {
    let source = MockCatalogueSource::new();
    let error = service(source)
        .find_character(None, Some("  "))
        .await
        .expect_err("blank name is rejected");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn resolver_issues_one_id_lookup_and_returns_the_first_match() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .withf(|query| *query == CharacterQuery::Id(7))
        .times(1)
        .returning(|_| Ok(vec![character(7)]));

    let found = service(source)
        .find_character(Some(7), None)
        .await
        .expect("id lookup succeeds");
    assert_eq!(found.id, 7);
}

#[tokio::test]
async fn resolver_prefers_id_when_both_selectors_are_supplied() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .withf(|query| *query == CharacterQuery::Id(7))
        .times(1)
        .returning(|_| Ok(vec![character(7)]));

    let found = service(source)
        .find_character(Some(7), Some("Tanjiro Kamado"))
        .await
        .expect("id wins silently");
    assert_eq!(found.id, 7);
}

#[tokio::test]
async fn resolver_not_found_message_references_the_id_field_for_name_lookups() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .withf(|query| *query == CharacterQuery::Name("Tanjiro Kamado".to_owned()))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let error = service(source)
        .find_character(None, Some("Tanjiro Kamado"))
        .await
        .expect_err("empty content is not-found");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Character with id Tanjiro Kamado not found.");
}

#[tokio::test]
async fn resolver_not_found_message_renders_numeric_ids() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let error = service(source)
        .find_character(Some(42), None)
        .await
        .expect_err("empty content is not-found");
    assert_eq!(error.message(), "Character with id 42 not found.");
}

#[tokio::test]
async fn resolver_forwards_upstream_status_verbatim() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .times(1)
        .returning(|_| Err(CatalogueSourceError::upstream(503, "backend unavailable")));

    let error = service(source)
        .find_character(Some(1), None)
        .await
        .expect_err("upstream errors propagate");
    assert_eq!(error.code(), ErrorCode::UpstreamFailure);
    assert_eq!(error.upstream_status(), Some(503));
    assert_eq!(error.message(), "backend unavailable");
}

#[tokio::test]
async fn resolver_maps_transport_failures_to_internal_errors() {
    let mut source = MockCatalogueSource::new();
    source
        .expect_find_characters()
        .times(1)
        .returning(|_| Err(CatalogueSourceError::transport("connection refused")));

    let error = service(source)
        .find_character(Some(1), None)
        .await
        .expect_err("transport failures propagate");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
