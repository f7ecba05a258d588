/// One language entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Display name, e.g. `C++`.
    pub name: String,
    /// Identifier used in fragments and API paths, e.g. `C%2B%2B`.
    pub escaped_name: String,
    pub repo_count: u64,
    pub star_count: u64,
    pub pages: u32,
}

/// Session-wide summary of every language and the page counts of each listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub repo_count: u64,
    pub star_count: u64,
    /// Page count of the unfiltered listing.
    pub pages: u32,
    pub languages: Vec<Language>,
}

impl Catalog {
    pub fn language(&self, escaped_name: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|language| language.escaped_name == escaped_name)
    }

    /// Page count of the listing a route points into; `None` for unknown languages.
    pub fn pages_for(&self, language: Option<&str>) -> Option<u32> {
        match language {
            None => Some(self.pages),
            Some(id) => self.language(id).map(|language| language.pages),
        }
    }
}

/// One entry of a result page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Repository {
    pub owner_login: String,
    pub name: String,
    pub github_link: String,
    pub avatar_url: String,
    pub description: String,
    pub homepage: String,
    pub language: String,
    pub stargazers: u64,
    pub archived: bool,
    /// SPDX identifier; `NOASSERTION` when GitHub could not tell.
    pub license: String,
    /// RFC 3339 timestamps as delivered by the API.
    pub created_at: Option<String>,
    pub pushed_at: Option<String>,
}
