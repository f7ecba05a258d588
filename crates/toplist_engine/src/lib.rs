//! Toplist engine: data API client and background fetch execution.
mod cache;
mod engine;
mod fetch;
mod types;

pub use cache::PrefetchCache;
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use fetch::{ApiClient, FetchSettings, ReqwestApiClient, DEFAULT_API_BASE};
pub use types::{
    ApiError, EngineEvent, LanguageRecord, MetadataResponse, PageRequest, RepositoryRecord,
    RequestId,
};
