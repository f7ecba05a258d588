use toplist_core::{InMemoryHistory, ScrollMemory, ScrollRecord, SessionHistory, Viewport};

#[derive(Debug, Default)]
struct FakeViewport {
    offset: ScrollRecord,
    jumps: Vec<ScrollRecord>,
}

impl Viewport for FakeViewport {
    fn offset(&self) -> ScrollRecord {
        self.offset
    }

    fn scroll_to(&mut self, record: ScrollRecord) {
        self.offset = record;
        self.jumps.push(record);
    }
}

#[test]
fn save_then_restore_reproduces_the_exact_offset() {
    let mut history = InMemoryHistory::new("#go/2");
    let viewport = FakeViewport {
        offset: ScrollRecord { x: 3.25, y: 1840.5 },
        ..FakeViewport::default()
    };
    ScrollMemory::save(&mut history, &viewport);

    let mut memory = ScrollMemory::new();
    assert!(memory.restore(&history));
    let mut fresh = FakeViewport::default();
    assert_eq!(memory.settle(&mut fresh), Some(ScrollRecord { x: 3.25, y: 1840.5 }));
    assert_eq!(fresh.offset, ScrollRecord { x: 3.25, y: 1840.5 });
}

#[test]
fn save_annotates_the_current_entry_without_pushing() {
    let mut history = InMemoryHistory::new("1");
    let viewport = FakeViewport {
        offset: ScrollRecord { x: 0.0, y: 120.0 },
        ..FakeViewport::default()
    };
    ScrollMemory::save(&mut history, &viewport);
    assert_eq!(history.len(), 1);
    assert_eq!(
        history.state(),
        Some(&serde_json::json!({ "position": { "x": 0.0, "y": 120.0 } }))
    );
}

#[test]
fn restore_is_applied_once() {
    let mut history = InMemoryHistory::new("");
    let viewport = FakeViewport {
        offset: ScrollRecord { x: 0.0, y: 64.0 },
        ..FakeViewport::default()
    };
    ScrollMemory::save(&mut history, &viewport);

    let mut memory = ScrollMemory::new();
    memory.restore(&history);
    let mut target = FakeViewport::default();
    assert!(memory.settle(&mut target).is_some());
    assert!(memory.settle(&mut target).is_none());
    assert_eq!(target.jumps.len(), 1);
}

#[test]
fn entry_without_state_leaves_viewport_alone() {
    let history = InMemoryHistory::new("go/1");
    let mut memory = ScrollMemory::new();
    assert!(!memory.restore(&history));
    assert!(!memory.has_pending());

    let mut viewport = FakeViewport {
        offset: ScrollRecord { x: 0.0, y: 10.0 },
        ..FakeViewport::default()
    };
    assert_eq!(memory.settle(&mut viewport), None);
    assert!(viewport.jumps.is_empty());
}

#[test]
fn foreign_history_state_is_ignored() {
    let mut history = InMemoryHistory::new("go/1");
    history.replace_state(serde_json::json!({ "something": "else" }));
    let mut memory = ScrollMemory::new();
    assert!(!memory.restore(&history));
}

#[test]
fn back_returns_to_the_offset_saved_when_leaving() {
    let mut history = InMemoryHistory::new("1");
    let mut viewport = FakeViewport {
        offset: ScrollRecord { x: 0.0, y: 900.0 },
        ..FakeViewport::default()
    };

    // Leaving page 1 for page 2.
    ScrollMemory::save(&mut history, &viewport);
    assert!(history.push_fragment("2"));
    viewport.offset = ScrollRecord { x: 0.0, y: 15.0 };

    // Going back lands on the entry annotated before leaving.
    assert!(history.back());
    assert_eq!(history.fragment(), "1");
    let mut memory = ScrollMemory::new();
    assert!(memory.restore(&history));
    memory.settle(&mut viewport);
    assert_eq!(viewport.offset, ScrollRecord { x: 0.0, y: 900.0 });
}

#[test]
fn history_push_follows_browser_rules() {
    let mut history = InMemoryHistory::new("#1");
    assert_eq!(history.fragment(), "1");
    assert!(!history.push_fragment("#1"));
    assert_eq!(history.len(), 1);

    assert!(history.push_fragment("2"));
    assert!(history.push_fragment("3"));
    assert!(history.back());
    assert!(history.back());
    assert!(!history.back());
    assert!(history.forward());
    assert_eq!(history.fragment(), "2");

    // Pushing from the middle drops the forward entries.
    assert!(history.push_fragment("go/1"));
    assert_eq!(history.len(), 3);
    assert!(!history.forward());
}
