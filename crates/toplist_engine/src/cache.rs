use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{PageRequest, RepositoryRecord};

/// Pages fetched ahead of the first navigation. The first real fetch claims
/// its page and closes the cache; prefetches landing later are discarded.
#[derive(Debug, Clone, Default)]
pub struct PrefetchCache {
    inner: Arc<Mutex<CacheState>>,
}

#[derive(Debug, Default)]
struct CacheState {
    pages: HashMap<PageRequest, Vec<RepositoryRecord>>,
    closed: bool,
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the page was kept.
    pub fn store(&self, page: PageRequest, records: Vec<RepositoryRecord>) -> bool {
        let Ok(mut state) = self.inner.lock() else {
            return false;
        };
        if state.closed {
            return false;
        }
        state.pages.insert(page, records);
        true
    }

    /// Hands out `page` if it was prefetched and drops everything else.
    pub fn claim(&self, page: &PageRequest) -> Option<Vec<RepositoryRecord>> {
        let mut state = self.inner.lock().ok()?;
        state.closed = true;
        let records = state.pages.remove(page);
        state.pages.clear();
        records
    }
}
