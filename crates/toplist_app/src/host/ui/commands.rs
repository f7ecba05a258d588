use toplist_core::{AppViewModel, PageEntry, ResultsView};

/// One line typed into the terminal browser.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Edit the address bar fragment.
    Open(String),
    Back,
    Forward,
    /// Language picker; `None` picks "all languages".
    Pick(Option<String>),
    /// Click a numbered pagination entry.
    Page(u32),
    Prev,
    Next,
    Scroll(f64),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open <fragment>     go to a fragment, e.g. `open rust/2`
  back | forward      move through history
  pick <language|all> choose in the language picker
  page <n>            click page n in the strip
  prev | next         click Previous / Next
  scroll <y>          scroll the window
  quit";

pub fn parse(line: &str) -> Result<UserCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "open" | "go" => Ok(UserCommand::Open(rest.to_string())),
        "back" | "b" => Ok(UserCommand::Back),
        "forward" | "f" => Ok(UserCommand::Forward),
        "pick" if rest.is_empty() => Err("pick needs a language or `all`".to_string()),
        "pick" if rest.eq_ignore_ascii_case("all") => Ok(UserCommand::Pick(None)),
        "pick" => Ok(UserCommand::Pick(Some(rest.to_string()))),
        "page" | "p" => rest
            .parse()
            .map(UserCommand::Page)
            .map_err(|_| format!("not a page number: {rest:?}")),
        "prev" => Ok(UserCommand::Prev),
        "next" => Ok(UserCommand::Next),
        "scroll" => rest
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && *y >= 0.0)
            .map(UserCommand::Scroll)
            .ok_or_else(|| format!("not a scroll offset: {rest:?}")),
        "help" | "?" | "" => Ok(UserCommand::Help),
        "quit" | "exit" | "q" => Ok(UserCommand::Quit),
        other => Err(format!("unknown command {other:?}; type `help`")),
    }
}

/// Escaped name of the picker option matching `query` by label or escaped name.
pub fn resolve_language(view: &AppViewModel, query: &str) -> Option<String> {
    let picker = view.picker.as_ref()?;
    picker
        .options
        .iter()
        .filter_map(|option| option.escaped_name.as_deref().map(|id| (id, option)))
        .find(|(id, option)| *id == query || option.label.eq_ignore_ascii_case(query))
        .map(|(id, _)| id.to_string())
}

/// Target page of the clickable strip entry the command refers to.
pub fn resolve_strip_target(view: &AppViewModel, command: &UserCommand) -> Option<u32> {
    let ResultsView::Loaded(list) = &view.results else {
        return None;
    };
    list.pagination
        .iter()
        .map(|link| link.entry)
        .find(|entry| match (command, entry) {
            (UserCommand::Prev, PageEntry::Prev { .. }) => true,
            (UserCommand::Next, PageEntry::Next { .. }) => true,
            (UserCommand::Page(wanted), PageEntry::Page { number, .. }) => number == wanted,
            _ => false,
        })
        .and_then(|entry| entry.target())
}
