use crate::{PageEntry, Repository, Route};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatisticsView {
    #[default]
    Loading,
    Ready {
        repo_count: u64,
        star_count: u64,
    },
    /// The catalog failed to load; nothing but the error is shown.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    /// `None` for the "all languages" option.
    pub escaped_name: Option<String>,
    pub label: String,
    pub repo_count: u64,
    pub star_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub options: Vec<PickerOption>,
    /// Escaped name of the selected language; `None` selects "all languages".
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLink {
    pub entry: PageEntry,
    /// Fragment link, e.g. `#go/3`; `None` when the entry is not clickable.
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultListView {
    pub title: String,
    pub route: Route,
    pub total_pages: u32,
    pub repositories: Vec<Repository>,
    pub pagination: Vec<PaginationLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Loading,
    Loaded(ResultListView),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub statistics: StatisticsView,
    /// Absent until the catalog is loaded.
    pub picker: Option<PickerView>,
    pub results: ResultsView,
    pub dirty: bool,
}
