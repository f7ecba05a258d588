use crate::{PageSelector, RequestId};

/// Work the host performs on behalf of [`crate::update`], in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog,
    /// Speculative fetch to warm the response cache; no message comes back.
    Prefetch { selector: PageSelector },
    FetchPage {
        request_id: RequestId,
        selector: PageSelector,
    },
    /// Store the viewport offset on the current history entry.
    SaveScroll,
    /// Navigate to this fragment; the host reports the change back as
    /// [`crate::Msg::FragmentChanged`].
    SetFragment(String),
    /// Restore the offset stored on the current history entry once the
    /// pending render has been flushed.
    RestoreScroll,
}
