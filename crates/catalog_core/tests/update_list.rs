use std::sync::Once;

use catalog_core::{
    update, AppState, CatalogEntry, Effect, EntryId, LoadStatus, Msg, Notification,
    RequestFailure, Route,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn entry(id: &str) -> CatalogEntry {
    CatalogEntry {
        id: EntryId::new(id),
        title: format!("Title {id}"),
        publishing_year: 1999,
        poster: None,
    }
}

#[test]
fn concurrent_loads_are_coalesced() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::LoadRequested);
    assert_eq!(first, vec![Effect::FetchEntries]);
    assert!(state.view().catalog.loading);

    let (state, second) = update(state, Msg::LoadRequested);
    assert!(second.is_empty());

    let (state, effects) = update(state, Msg::EntriesLoaded(Ok(vec![entry("1")])));
    assert!(effects.is_empty());
    assert!(!state.view().catalog.loading);
    assert_eq!(state.list().entries().len(), 1);

    // Once settled a new load goes out again.
    let (_state, third) = update(state, Msg::LoadRequested);
    assert_eq!(third, vec![Effect::FetchEntries]);
}

#[test]
fn failed_load_notifies_and_keeps_previous_entries() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(state, Msg::EntriesLoaded(Ok(vec![entry("1"), entry("2")])));

    let (state, _) = update(state, Msg::LoadRequested);
    let (state, effects) = update(
        state,
        Msg::EntriesLoaded(Err(RequestFailure::Unavailable("connection refused".into()))),
    );

    assert_eq!(state.list().entries().len(), 2);
    assert_eq!(
        state.list().status(),
        &LoadStatus::Failed("connection refused".into())
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "Error loading entries. Please try again."
        ))]
    );
}

#[test]
fn expired_session_during_load_is_silent() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, effects) = update(state, Msg::EntriesLoaded(Err(RequestFailure::SessionExpired)));

    assert!(effects.is_empty());
    assert_eq!(state.list().status(), &LoadStatus::Idle);
}

#[test]
fn unsolicited_entries_are_dropped() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::EntriesLoaded(Ok(vec![entry("1")])));
    assert!(effects.is_empty());
    assert!(state.list().is_empty());
}

#[test]
fn list_actions_navigate() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CreateClicked);
    assert_eq!(effects, vec![Effect::Navigate(Route::CreateEntry)]);

    let (state, effects) = update(state, Msg::EntryClicked(EntryId::new("42")));
    assert_eq!(
        effects,
        vec![Effect::Navigate(Route::EditEntry(EntryId::new("42")))]
    );
    assert_eq!(state.route(), &Route::EditEntry(EntryId::new("42")));
}
