use crate::{Catalog, Repository, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished loading; carries the fragment present at load time.
    Started { fragment: String },
    /// Catalog fetch succeeded.
    CatalogLoaded(Catalog),
    /// Catalog fetch failed; the application cannot become ready.
    CatalogFailed { detail: String },
    /// The URL fragment changed (user edit, back/forward, or our own write).
    FragmentChanged(String),
    /// User picked an entry in the language picker; `None` is "all languages".
    LanguagePicked(Option<String>),
    /// User clicked a pagination entry targeting this page.
    PageClicked(u32),
    /// A page of results arrived.
    PageLoaded {
        request_id: RequestId,
        repositories: Vec<Repository>,
    },
    /// A page fetch failed.
    PageFailed { request_id: RequestId, detail: String },
    /// Host-level failure outside any fetch.
    Fault(String),
}
