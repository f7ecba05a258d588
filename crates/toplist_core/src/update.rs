use toplist_logging::{toplist_debug, toplist_error, toplist_info, toplist_warn};

use crate::{decode, decode_preload, encode, AppState, Effect, Msg, Phase, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started { fragment } => {
            if state.phase() != Phase::Booting {
                return (state, Vec::new());
            }
            let selector = decode_preload(&fragment);
            state.remember_fragment(fragment);
            state.mark_dirty();
            vec![Effect::FetchCatalog, Effect::Prefetch { selector }]
        }
        Msg::CatalogLoaded(catalog) => {
            if state.phase() != Phase::Booting {
                return (state, Vec::new());
            }
            toplist_info!(
                "catalog loaded: {} languages, {} pages overall",
                catalog.languages.len(),
                catalog.pages
            );
            state.become_ready(catalog);
            let fragment = state.fragment().to_string();
            navigate(&mut state, fragment)
        }
        Msg::CatalogFailed { detail } => {
            if state.phase() != Phase::Booting {
                return (state, Vec::new());
            }
            toplist_error!("catalog failed to load: {}", detail);
            state.fail(detail);
            Vec::new()
        }
        Msg::FragmentChanged(fragment) => match state.phase() {
            Phase::Booting => {
                state.remember_fragment(fragment);
                Vec::new()
            }
            Phase::Ready => navigate(&mut state, fragment),
            Phase::Failed => Vec::new(),
        },
        Msg::LanguagePicked(language) => {
            let Some(catalog) = ready_catalog(&state) else {
                return (state, Vec::new());
            };
            let route = match language {
                None => Some(Route::AllLanguages { page: 1 }),
                Some(id) => {
                    let known = catalog.language(&id).map(|language| Route::OneLanguage {
                        language: language.escaped_name.clone(),
                        page: 1,
                    });
                    if known.is_none() {
                        toplist_warn!("picked unknown language {:?}", id);
                    }
                    known
                }
            };
            match route {
                Some(route) => vec![Effect::SaveScroll, Effect::SetFragment(encode(&route))],
                None => Vec::new(),
            }
        }
        Msg::PageClicked(page) => {
            if ready_catalog(&state).is_none() {
                return (state, Vec::new());
            }
            match state.displayed_route() {
                Some(route) => {
                    let target = route.with_page(page);
                    vec![Effect::SaveScroll, Effect::SetFragment(encode(&target))]
                }
                None => Vec::new(),
            }
        }
        Msg::PageLoaded {
            request_id,
            repositories,
        } => {
            if state.phase() != Phase::Ready {
                return (state, Vec::new());
            }
            match state.settle_request(request_id) {
                Some(route) => {
                    toplist_debug!(
                        "request {} rendered {} repositories for #{}",
                        request_id,
                        repositories.len(),
                        encode(&route)
                    );
                    state.show_results(route, repositories);
                    vec![Effect::RestoreScroll]
                }
                None => {
                    toplist_info!("dropped superseded response for request {}", request_id);
                    Vec::new()
                }
            }
        }
        Msg::PageFailed { request_id, detail } => {
            if state.phase() != Phase::Ready {
                return (state, Vec::new());
            }
            toplist_warn!("request {} failed: {}", request_id, detail);
            if state.settle_request(request_id).is_none() {
                return (state, Vec::new());
            }
            state.show_error(detail);
            vec![Effect::RestoreScroll]
        }
        Msg::Fault(detail) => {
            toplist_error!("fault: {}", detail);
            if state.phase() == Phase::Booting {
                state.fail(detail);
            } else {
                state.abandon_requests();
                state.show_error(detail);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn ready_catalog(state: &AppState) -> Option<&crate::Catalog> {
    match state.phase() {
        Phase::Ready => state.catalog(),
        Phase::Booting | Phase::Failed => None,
    }
}

/// Decodes `fragment`, shows loading, and requests the page it points at.
fn navigate(state: &mut AppState, fragment: String) -> Vec<Effect> {
    let Some(catalog) = state.catalog() else {
        return Vec::new();
    };
    let route = decode(&fragment, catalog);
    state.remember_fragment(fragment);
    state.set_route(route.clone());
    let selector = route.selector();
    let request_id = state.issue_request(route);
    vec![Effect::FetchPage {
        request_id,
        selector,
    }]
}
