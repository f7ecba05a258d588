use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use toplist_logging::{toplist_debug, toplist_warn};

use crate::fetch::{ApiClient, FetchSettings, ReqwestApiClient};
use crate::{ApiError, EngineEvent, PageRequest, PrefetchCache, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Client(#[from] ApiError),
}

enum EngineCommand {
    FetchCatalog,
    Prefetch(PageRequest),
    FetchPage {
        request_id: RequestId,
        page: PageRequest,
    },
}

impl EngineCommand {
    /// Log tag; only page fetches belong to a navigation.
    fn navigation(&self) -> RequestId {
        match self {
            EngineCommand::FetchPage { request_id, .. } => *request_id,
            EngineCommand::FetchCatalog | EngineCommand::Prefetch(_) => 0,
        }
    }
}

/// Sends work to the background runtime. Fetches are never cancelled.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for fetch completions.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<(Self, EngineEvents), EngineError> {
        let client = ReqwestApiClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(
        client: Arc<dyn ApiClient>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let cache = PrefetchCache::new();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let cache = cache.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), &cache, command, event_tx).await;
                });
            }
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn fetch_catalog(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchCatalog);
    }

    pub fn prefetch(&self, page: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Prefetch(page));
    }

    pub fn fetch_page(&self, request_id: RequestId, page: PageRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchPage { request_id, page });
    }
}

impl EngineEvents {
    /// Blocks until the next completion; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ApiClient,
    cache: &PrefetchCache,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    // The tag is thread-local and a task may resume on another worker after an await.
    let navigation = command.navigation();
    toplist_logging::set_navigation(navigation);
    match command {
        EngineCommand::FetchCatalog => {
            let result = client.fetch_catalog().await;
            let _ = event_tx.send(EngineEvent::CatalogLoaded(result));
        }
        EngineCommand::Prefetch(page) => {
            let result = client.fetch_page(&page).await;
            toplist_logging::set_navigation(navigation);
            match result {
                Ok(records) => {
                    let count = records.len();
                    if cache.store(page.clone(), records) {
                        toplist_debug!("prefetched {} ({} records)", page.path(), count);
                    } else {
                        toplist_debug!("prefetch of {} landed after first fetch", page.path());
                    }
                }
                Err(err) => toplist_warn!("prefetch of {} failed: {}", page.path(), err),
            }
        }
        EngineCommand::FetchPage { request_id, page } => {
            let result = match cache.claim(&page) {
                Some(records) => {
                    toplist_debug!("served {} from prefetch", page.path());
                    Ok(records)
                }
                None => client.fetch_page(&page).await,
            };
            let _ = event_tx.send(EngineEvent::PageLoaded { request_id, result });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetadataResponse, RepositoryRecord};

    struct EmptyClient;

    #[async_trait::async_trait]
    impl ApiClient for EmptyClient {
        async fn fetch_catalog(&self) -> Result<MetadataResponse, ApiError> {
            Ok(MetadataResponse::default())
        }

        async fn fetch_page(
            &self,
            _page: &PageRequest,
        ) -> Result<Vec<RepositoryRecord>, ApiError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn work_outside_a_navigation_is_not_tagged_with_a_stale_id() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let cache = PrefetchCache::new();
        let (event_tx, event_rx) = mpsc::channel();
        let page = PageRequest::All { page: 1 };

        runtime.block_on(handle_command(
            &EmptyClient,
            &cache,
            EngineCommand::FetchPage {
                request_id: 9,
                page: page.clone(),
            },
            event_tx.clone(),
        ));
        assert_eq!(toplist_logging::current_navigation(), 9);

        runtime.block_on(handle_command(
            &EmptyClient,
            &cache,
            EngineCommand::Prefetch(page),
            event_tx.clone(),
        ));
        assert_eq!(toplist_logging::current_navigation(), 0);

        runtime.block_on(handle_command(
            &EmptyClient,
            &cache,
            EngineCommand::FetchCatalog,
            event_tx,
        ));
        assert_eq!(toplist_logging::current_navigation(), 0);
        assert_eq!(event_rx.try_iter().count(), 2);
    }
}
