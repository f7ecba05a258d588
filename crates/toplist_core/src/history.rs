use crate::scroll::SessionHistory;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    fragment: String,
    state: Option<serde_json::Value>,
}

/// In-memory session history with the same push/replace/traverse rules as a
/// browser tab.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryHistory {
    entries: Vec<Entry>,
    cursor: usize,
}

impl InMemoryHistory {
    pub fn new(initial_fragment: &str) -> Self {
        Self {
            entries: vec![Entry {
                fragment: strip_separator(initial_fragment).to_string(),
                state: None,
            }],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

fn strip_separator(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

impl SessionHistory for InMemoryHistory {
    fn fragment(&self) -> &str {
        &self.entries[self.cursor].fragment
    }

    fn push_fragment(&mut self, fragment: &str) -> bool {
        let fragment = strip_separator(fragment);
        if fragment == self.fragment() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry {
            fragment: fragment.to_string(),
            state: None,
        });
        self.cursor += 1;
        true
    }

    fn replace_state(&mut self, state: serde_json::Value) {
        self.entries[self.cursor].state = Some(state);
    }

    fn state(&self) -> Option<&serde_json::Value> {
        self.entries[self.cursor].state.as_ref()
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
