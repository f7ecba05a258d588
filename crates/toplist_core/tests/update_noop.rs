use toplist_core::{update, AppState, Msg, Repository};

#[test]
fn clicks_before_catalog_are_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PageClicked(2));
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn picks_before_catalog_are_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::LanguagePicked(Some("go".to_string())));
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn page_responses_while_booting_are_ignored() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::PageLoaded {
            request_id: 1,
            repositories: vec![Repository::default()],
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
