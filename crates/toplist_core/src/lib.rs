//! Toplist core: fragment router, page strip and scroll memory.
//!
//! Everything here is pure or works through the [`SessionHistory`] and
//! [`Viewport`] traits, so a host only has to feed messages into [`update`],
//! render [`AppViewModel`] and execute the returned [`Effect`]s.
mod catalog;
mod effect;
mod history;
mod msg;
mod page_strip;
mod route;
mod scroll;
mod state;
mod update;
mod view_model;

pub use catalog::{Catalog, Language, Repository};
pub use effect::Effect;
pub use history::InMemoryHistory;
pub use msg::Msg;
pub use page_strip::{compute_entries, PageEntry, HALF_WINDOW};
pub use route::{decode, decode_preload, encode, PageSelector, Route};
pub use scroll::{ScrollMemory, ScrollRecord, SessionHistory, Viewport};
pub use state::{AppState, Phase, RequestId, ResponseOrdering};
pub use update::update;
pub use view_model::{
    AppViewModel, PaginationLink, PickerOption, PickerView, ResultListView, ResultsView,
    StatisticsView,
};
