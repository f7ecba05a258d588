//! Encoding and decoding of the URL fragment.
//!
//! Grammar: `<page>` for the unfiltered listing, `<language-id>/<page>` for a
//! single language. Anything else resolves to the first page of the unfiltered
//! listing. Decoding never fails: malformed input degrades to a valid route.

use toplist_logging::toplist_debug;

use crate::Catalog;

const SEPARATOR: char = '#';

/// What should currently be displayed. Only meaningful relative to a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    AllLanguages { page: u32 },
    OneLanguage { language: String, page: u32 },
}

impl Default for Route {
    fn default() -> Self {
        Route::AllLanguages { page: 1 }
    }
}

impl Route {
    pub fn page(&self) -> u32 {
        match self {
            Route::AllLanguages { page } | Route::OneLanguage { page, .. } => *page,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Route::AllLanguages { .. } => None,
            Route::OneLanguage { language, .. } => Some(language),
        }
    }

    /// Same listing, different page.
    pub fn with_page(&self, page: u32) -> Route {
        match self {
            Route::AllLanguages { .. } => Route::AllLanguages { page },
            Route::OneLanguage { language, .. } => Route::OneLanguage {
                language: language.clone(),
                page,
            },
        }
    }

    pub fn selector(&self) -> PageSelector {
        match self {
            Route::AllLanguages { page } => PageSelector::All { page: *page },
            Route::OneLanguage { language, page } => PageSelector::Language {
                escaped_name: language.clone(),
                page: *page,
            },
        }
    }
}

/// Unchecked address of one page of results, as understood by the data API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageSelector {
    All { page: u32 },
    Language { escaped_name: String, page: u32 },
}

impl PageSelector {
    pub fn page(&self) -> u32 {
        match self {
            PageSelector::All { page } | PageSelector::Language { page, .. } => *page,
        }
    }
}

/// Raw pieces of a fragment. Shared by [`decode`] and [`decode_preload`].
#[derive(Debug, PartialEq, Eq)]
struct FragmentParts<'a> {
    /// Whether the text starts with a digit, i.e. reads as an unfiltered page.
    digit_first: bool,
    /// Leading number of the whole text.
    all_languages_page: Option<u32>,
    /// Text before the first `/`.
    language: &'a str,
    /// Leading number of the text after the first `/`.
    language_page: Option<u32>,
}

fn parse_fragment(fragment: &str) -> FragmentParts<'_> {
    let text = fragment.strip_prefix(SEPARATOR).unwrap_or(fragment);
    let (language, page_text) = match text.split_once('/') {
        Some((language, page_text)) => (language, Some(page_text)),
        None => (text, None),
    };
    FragmentParts {
        digit_first: text.starts_with(|c: char| c.is_ascii_digit()),
        all_languages_page: parse_page(text),
        language,
        language_page: page_text.and_then(parse_page),
    }
}

/// Positive page number from the leading ASCII digits; the rest is ignored,
/// so `2abc` and `2/extra` both read as page 2.
fn parse_page(text: &str) -> Option<u32> {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    text[..digits].parse::<u32>().ok().filter(|page| *page > 0)
}

/// Resolves a fragment against the catalog. Always yields a valid route.
///
/// An exact language id wins over an unfiltered page number, so ids such as
/// `1C%20Enterprise` stay reachable.
pub fn decode(fragment: &str, catalog: &Catalog) -> Route {
    let parts = parse_fragment(fragment);

    if let Some(language) = catalog.language(parts.language) {
        let page = match parts.language_page {
            Some(page) if page <= language.pages => page,
            other => {
                if other.is_some() {
                    toplist_debug!(
                        "page out of range for {} in fragment {:?}, using page 1",
                        language.escaped_name,
                        fragment
                    );
                }
                1
            }
        };
        return Route::OneLanguage {
            language: language.escaped_name.clone(),
            page,
        };
    }

    if parts.digit_first {
        if let Some(page) = parts.all_languages_page.filter(|page| *page <= catalog.pages) {
            return Route::AllLanguages { page };
        }
    }

    if !fragment.trim_start_matches(SEPARATOR).is_empty() {
        toplist_debug!("unrecognized fragment {:?}, using default route", fragment);
    }
    Route::default()
}

/// Lenient decode used before the catalog exists. Nothing is validated beyond
/// the grammar itself, so the result may name a language or page that does
/// not exist.
pub fn decode_preload(fragment: &str) -> PageSelector {
    let parts = parse_fragment(fragment);

    if parts.digit_first {
        return PageSelector::All {
            page: parts.all_languages_page.unwrap_or(1),
        };
    }
    if parts.language.is_empty() {
        return PageSelector::All { page: 1 };
    }
    PageSelector::Language {
        escaped_name: parts.language.to_string(),
        page: parts.language_page.unwrap_or(1),
    }
}

/// Fragment text for a route, without the leading `#`.
pub fn encode(route: &Route) -> String {
    match route {
        Route::AllLanguages { page } => page.to_string(),
        Route::OneLanguage { language, page } => format!("{language}/{page}"),
    }
}
