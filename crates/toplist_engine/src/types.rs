use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Response of `GET {base}/metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataResponse {
    pub count_of_all_repos: u64,
    pub count_of_all_stars: u64,
    pub all_repos_pages: u32,
    #[serde(default)]
    pub languages: Vec<LanguageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageRecord {
    pub name: String,
    pub escaped_name: String,
    pub count_of_repos: u64,
    pub count_of_stars: u64,
    pub pages: u32,
}

/// One element of a toplist page. Fields the browser never shows are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RepositoryRecord {
    pub full_name: String,
    pub name: String,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub github_link: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers: u64,
    #[serde(deserialize_with = "flag")]
    pub archived: bool,
    pub license_spdx_id: Option<String>,
    pub created_at: Option<String>,
    pub repo_pushed_at: Option<String>,
}

/// The API encodes booleans as 0/1.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(value) => value,
        serde_json::Value::Number(value) => value.as_u64().is_some_and(|value| value != 0),
        _ => false,
    })
}

/// Address of one toplist page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRequest {
    All { page: u32 },
    Language { escaped_name: String, page: u32 },
}

impl PageRequest {
    /// Path below the API base, e.g. `language/go/2`.
    pub fn path(&self) -> String {
        match self {
            PageRequest::All { page } => format!("all/{page}"),
            PageRequest::Language { escaped_name, page } => {
                format!("language/{escaped_name}/{page}")
            }
        }
    }
}

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CatalogLoaded(Result<MetadataResponse, ApiError>),
    PageLoaded {
        request_id: RequestId,
        result: Result<Vec<RepositoryRecord>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {status}: {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("response too large (max {max_bytes}, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}
