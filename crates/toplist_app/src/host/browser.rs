use toplist_core::{InMemoryHistory, Msg, ScrollMemory, ScrollRecord, SessionHistory, Viewport};
use toplist_logging::toplist_debug;

/// Scroll position of the terminal "window". Moved by the `scroll` command
/// and by scroll restores.
#[derive(Debug, Default)]
pub struct TerminalViewport {
    offset: ScrollRecord,
    /// Last restore applied, reported once by the renderer.
    restored: Option<ScrollRecord>,
}

impl TerminalViewport {
    pub fn take_restored(&mut self) -> Option<ScrollRecord> {
        self.restored.take()
    }

    fn scroll_by_user(&mut self, y: f64) {
        self.offset = ScrollRecord { x: 0.0, y };
    }
}

impl Viewport for TerminalViewport {
    fn offset(&self) -> ScrollRecord {
        self.offset
    }

    fn scroll_to(&mut self, record: ScrollRecord) {
        toplist_debug!("viewport jumps to ({}, {})", record.x, record.y);
        self.offset = record;
        self.restored = Some(record);
    }
}

/// The tab the router lives in: session history plus viewport.
#[derive(Debug)]
pub struct TerminalBrowser {
    pub history: InMemoryHistory,
    pub viewport: TerminalViewport,
}

impl TerminalBrowser {
    pub fn new(initial_fragment: &str) -> Self {
        Self {
            history: InMemoryHistory::new(initial_fragment),
            viewport: TerminalViewport::default(),
        }
    }

    pub fn fragment(&self) -> String {
        self.history.fragment().to_string()
    }

    /// User scrolling. Once the viewport settles the offset is recorded on the
    /// current entry, so leaving it by back/forward keeps the position too.
    pub fn scroll(&mut self, y: f64) {
        self.viewport.scroll_by_user(y);
        ScrollMemory::save(&mut self.history, &self.viewport);
    }

    /// Writes the fragment. A change is reported like a `hashchange` event.
    pub fn navigate(&mut self, fragment: &str) -> Option<Msg> {
        self.history
            .push_fragment(fragment)
            .then(|| self.fragment_changed())
    }

    pub fn back(&mut self) -> Option<Msg> {
        self.history.back().then(|| self.fragment_changed())
    }

    pub fn forward(&mut self) -> Option<Msg> {
        self.history.forward().then(|| self.fragment_changed())
    }

    fn fragment_changed(&self) -> Msg {
        Msg::FragmentChanged(self.fragment())
    }
}
