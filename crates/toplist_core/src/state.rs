use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::view_model::{
    AppViewModel, PaginationLink, PickerOption, PickerView, ResultListView, ResultsView,
    StatisticsView,
};
use crate::{compute_entries, encode, Catalog, Repository, Route};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the catalog; no route decoding yet.
    #[default]
    Booting,
    Ready,
    /// Catalog never arrived; only the error state is shown.
    Failed,
}

/// Which page responses may replace the result list.
///
/// Page fetches are never cancelled, so two navigations in quick succession
/// leave two responses in flight that may resolve in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseOrdering {
    /// Any response renders when it resolves; a slow older response can
    /// overwrite a newer one.
    LastResolvedWins,
    /// Only the response to the most recently issued fetch renders.
    #[default]
    LatestRequestWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ResultsPanel {
    #[default]
    Loading,
    Loaded {
        route: Route,
        repositories: Vec<Repository>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    ordering: ResponseOrdering,
    fragment: String,
    catalog: Option<Catalog>,
    route: Option<Route>,
    last_request_id: RequestId,
    in_flight: BTreeMap<RequestId, Route>,
    results: ResultsPanel,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ordering(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Route decoded from the most recent fragment. `None` while booting.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn remember_fragment(&mut self, fragment: String) {
        self.fragment = fragment;
    }

    pub(crate) fn become_ready(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
        self.phase = Phase::Ready;
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, detail: String) {
        self.phase = Phase::Failed;
        self.results = ResultsPanel::Error(detail);
        self.in_flight.clear();
        self.mark_dirty();
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    /// Registers a page fetch for `route` and switches the result list to loading.
    pub(crate) fn issue_request(&mut self, route: Route) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        toplist_logging::set_navigation(request_id);
        self.in_flight.insert(request_id, route);
        self.results = ResultsPanel::Loading;
        self.mark_dirty();
        request_id
    }

    /// Retires a request. Returns its route when the response may be shown.
    pub(crate) fn settle_request(&mut self, request_id: RequestId) -> Option<Route> {
        let route = self.in_flight.remove(&request_id)?;
        match self.ordering {
            ResponseOrdering::LastResolvedWins => Some(route),
            ResponseOrdering::LatestRequestWins => {
                (request_id == self.last_request_id).then_some(route)
            }
        }
    }

    /// Forgets every in-flight fetch so no late response can replace the view.
    pub(crate) fn abandon_requests(&mut self) {
        self.in_flight.clear();
    }

    pub(crate) fn show_results(&mut self, route: Route, repositories: Vec<Repository>) {
        self.results = ResultsPanel::Loaded {
            route,
            repositories,
        };
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, detail: String) {
        self.results = ResultsPanel::Error(detail);
        self.mark_dirty();
    }

    /// Route whose pagination the user is looking at.
    pub(crate) fn displayed_route(&self) -> Option<&Route> {
        match &self.results {
            ResultsPanel::Loaded { route, .. } => Some(route),
            _ => self.route.as_ref(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        let results = match &self.results {
            ResultsPanel::Loading => ResultsView::Loading,
            ResultsPanel::Error(detail) => ResultsView::Error(detail.clone()),
            ResultsPanel::Loaded {
                route,
                repositories,
            } => ResultsView::Loaded(self.result_list(route, repositories)),
        };

        match (&self.phase, &self.catalog) {
            (Phase::Ready, Some(catalog)) => AppViewModel {
                statistics: StatisticsView::Ready {
                    repo_count: catalog.repo_count,
                    star_count: catalog.star_count,
                },
                picker: Some(picker_view(catalog, self.route.as_ref())),
                results,
                dirty: self.dirty,
            },
            (Phase::Failed, _) => AppViewModel {
                statistics: StatisticsView::Hidden,
                picker: None,
                results,
                dirty: self.dirty,
            },
            _ => AppViewModel {
                statistics: StatisticsView::Loading,
                picker: None,
                results,
                dirty: self.dirty,
            },
        }
    }

    fn result_list(&self, route: &Route, repositories: &[Repository]) -> ResultListView {
        let catalog = self.catalog.as_ref();
        let total_pages = catalog
            .and_then(|catalog| catalog.pages_for(route.language()))
            .unwrap_or_else(|| route.page());
        let filter = match route.language() {
            None => "All languages".to_string(),
            Some(id) => catalog
                .and_then(|catalog| catalog.language(id))
                .map_or_else(|| id.to_string(), |language| language.name.clone()),
        };
        let pagination = compute_entries(route.page(), total_pages)
            .into_iter()
            .map(|entry| PaginationLink {
                entry,
                href: entry
                    .target()
                    .map(|page| format!("#{}", encode(&route.with_page(page)))),
            })
            .collect();

        ResultListView {
            title: format!("{filter}, page {} of {total_pages}", route.page()),
            route: route.clone(),
            total_pages,
            repositories: repositories.to_vec(),
            pagination,
        }
    }
}

fn picker_view(catalog: &Catalog, route: Option<&Route>) -> PickerView {
    let mut options = Vec::with_capacity(catalog.languages.len() + 1);
    options.push(PickerOption {
        escaped_name: None,
        label: "All languages".to_string(),
        repo_count: catalog.repo_count,
        star_count: catalog.star_count,
    });
    options.extend(catalog.languages.iter().map(|language| PickerOption {
        escaped_name: Some(language.escaped_name.clone()),
        label: language.name.clone(),
        repo_count: language.repo_count,
        star_count: language.star_count,
    }));
    PickerView {
        options,
        selected: route.and_then(Route::language).map(ToOwned::to_owned),
    }
}
