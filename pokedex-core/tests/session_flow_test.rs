//! Browse flows: text search, category selection, and the ordering of
//! responses that arrive after the user has moved on.

mod common;

use common::{init_test_logging, GatedSource, StaticSource};
use pokedex_core::detail::RowState;
use pokedex_core::session::CategoryOutcome;
use pokedex_core::{BrowserSession, CatalogSource, FilterMode};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn names(session: &BrowserSession) -> Vec<&str> {
    session.displayed().iter().map(|r| r.name.as_str()).collect()
}

async fn loaded(source: &dyn CatalogSource) -> BrowserSession {
    let mut session = BrowserSession::new();
    session.load_from(source).await;
    session
}

#[tokio::test]
async fn test_search_char_finds_charmander() {
    init_test_logging();
    let source = StaticSource::starters();
    let mut session = loaded(&source).await;

    session.search("char");

    assert_eq!(names(&session), vec!["Charmander"]);
}

#[tokio::test]
async fn test_category_replaces_text_filter() {
    init_test_logging();
    let source = StaticSource::starters();
    let mut session = loaded(&source).await;

    session.search("squ");
    assert_eq!(names(&session), vec!["Squirtle"]);

    let outcome = session.select_category(&source, "fire").await;

    assert_eq!(outcome, CategoryOutcome::Applied(2));
    assert_eq!(names(&session), vec!["Charmander", "Vulpix"]);
    assert_eq!(session.mode(), &FilterMode::ByCategory("fire".to_string()));
    // Category members need not be part of the bulk listing
    assert_eq!(session.full().len(), 3);
}

#[tokio::test]
async fn test_search_after_category_uses_full_set() {
    init_test_logging();
    let source = StaticSource::starters();
    let mut session = loaded(&source).await;

    session.select_category(&source, "fire").await;
    session.search("a");

    assert_eq!(names(&session), vec!["Bulbasaur", "Charmander"]);
}

#[tokio::test]
async fn test_failed_category_fetch_keeps_displayed() {
    init_test_logging();
    let source = StaticSource::starters();
    let mut session = loaded(&source).await;
    session.search("bulb");

    let outcome = session.select_category(&source, "dragon").await;

    assert_eq!(outcome, CategoryOutcome::Failed);
    assert_eq!(names(&session), vec!["Bulbasaur"]);
}

#[tokio::test]
async fn test_late_category_response_after_all_is_discarded() {
    init_test_logging();
    let source = Arc::new(GatedSource::new(StaticSource::starters(), &["fire"]));
    let mut session = loaded(&*source).await;

    let request = session.begin_category("fire");
    let task_source = Arc::clone(&source);
    let pending =
        tokio::spawn(async move { task_source.fetch_records_by_category("fire").await });

    session.show_all();
    source.release("fire");
    let result = pending.await.unwrap();

    assert_eq!(session.apply_category(&request, result), CategoryOutcome::Stale);
    assert_eq!(session.displayed(), session.full());
    assert_eq!(session.mode(), &FilterMode::All);
}

#[tokio::test]
async fn test_late_category_response_after_search_is_discarded() {
    init_test_logging();
    let source = Arc::new(GatedSource::new(StaticSource::starters(), &["water"]));
    let mut session = loaded(&*source).await;

    let request = session.begin_category("water");
    let task_source = Arc::clone(&source);
    let pending =
        tokio::spawn(async move { task_source.fetch_records_by_category("water").await });

    session.search("char");
    source.release("water");

    let outcome = session.apply_category(&request, pending.await.unwrap());
    assert_eq!(outcome, CategoryOutcome::Stale);
    assert_eq!(names(&session), vec!["Charmander"]);
}

#[tokio::test]
async fn test_overlapping_categories_last_selection_wins() {
    init_test_logging();
    let source = StaticSource::starters();
    let mut session = loaded(&source).await;

    let fire = session.begin_category("fire");
    let water = session.begin_category("water");

    // water resolves first, fire arrives late
    let water_result = source.fetch_records_by_category("water").await;
    assert_eq!(
        session.apply_category(&water, water_result),
        CategoryOutcome::Applied(1)
    );
    let fire_result = source.fetch_records_by_category("fire").await;
    assert_eq!(session.apply_category(&fire, fire_result), CategoryOutcome::Stale);

    assert_eq!(names(&session), vec!["Squirtle"]);
}

/// Detail lookups are not sequenced: the response applied last owns the
/// slot, even when it belongs to the earlier selection.
#[tokio::test]
async fn test_overlapping_detail_lookups_last_response_wins() {
    init_test_logging();
    let starters = StaticSource::starters();
    let bulbasaur = starters.records[0].clone();
    let charmander = starters.records[1].clone();
    let source = Arc::new(GatedSource::new(
        starters,
        &[bulbasaur.source_ref.as_str(), charmander.source_ref.as_str()],
    ));
    let mut session = loaded(&*source).await;

    let first = session.begin_detail(&bulbasaur);
    let first_source = Arc::clone(&source);
    let first_ref = first.source_ref.clone();
    let first_lookup = tokio::spawn(async move { first_source.fetch_detail(&first_ref).await });

    let second = session.begin_detail(&charmander);
    let second_source = Arc::clone(&source);
    let second_ref = second.source_ref.clone();
    let second_lookup =
        tokio::spawn(async move { second_source.fetch_detail(&second_ref).await });

    assert_eq!(session.row_state(&bulbasaur), RowState::Loading);
    assert_eq!(session.row_state(&charmander), RowState::Loading);

    // The second selection's response lands first
    source.release(&charmander.source_ref);
    let second_result = second_lookup.await.unwrap();
    session.apply_detail(&second, second_result);
    assert_eq!(session.row_state(&charmander), RowState::Expanded);

    source.release(&bulbasaur.source_ref);
    let first_result = first_lookup.await.unwrap();
    session.apply_detail(&first, first_result);

    assert_eq!(session.detail().map(|d| d.name.as_str()), Some("Bulbasaur"));
    assert_eq!(session.row_state(&bulbasaur), RowState::Expanded);
    assert_eq!(session.row_state(&charmander), RowState::Collapsed);
}

#[tokio::test]
async fn test_detail_failure_keeps_previous_panel() {
    init_test_logging();
    let mut source = StaticSource::starters();
    source.records.push(common::record("Missingno", 0));
    let mut session = loaded(&source).await;

    let squirtle = session.displayed()[2].clone();
    let missing = session.displayed()[3].clone();

    assert!(session.select_record(&source, &squirtle).await);
    assert!(!session.select_record(&source, &missing).await);

    assert_eq!(session.row_state(&squirtle), RowState::Expanded);
    assert_eq!(session.row_state(&missing), RowState::Collapsed);
    assert_eq!(
        session.detail_for(&squirtle).map(|d| d.types_display()),
        Some("water".to_string())
    );
}
