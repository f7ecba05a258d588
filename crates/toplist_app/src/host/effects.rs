use toplist_core::{Catalog, Effect, Language, Msg, PageSelector, Repository, ScrollMemory};
use toplist_engine::{EngineEvent, EngineHandle, MetadataResponse, PageRequest, RepositoryRecord};
use toplist_logging::{toplist_info, toplist_trace};

use super::browser::TerminalBrowser;

pub struct EffectRunner {
    engine: EngineHandle,
    scroll: ScrollMemory,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            scroll: ScrollMemory::new(),
        }
    }

    /// Executes effects in order. Returns messages the browser raised meanwhile.
    pub fn run(&mut self, effects: Vec<Effect>, browser: &mut TerminalBrowser) -> Vec<Msg> {
        let mut raised = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchCatalog => self.engine.fetch_catalog(),
                Effect::Prefetch { selector } => {
                    toplist_trace!("prefetch {:?}", selector);
                    self.engine.prefetch(page_request(selector));
                }
                Effect::FetchPage {
                    request_id,
                    selector,
                } => {
                    toplist_info!("FetchPage request_id={} {:?}", request_id, selector);
                    self.engine.fetch_page(request_id, page_request(selector));
                }
                Effect::SaveScroll => {
                    ScrollMemory::save(&mut browser.history, &browser.viewport);
                }
                Effect::SetFragment(fragment) => {
                    raised.extend(browser.navigate(&fragment));
                }
                Effect::RestoreScroll => {
                    // The view has already been written when effects run.
                    if self.scroll.restore(&browser.history) {
                        self.scroll.settle(&mut browser.viewport);
                    }
                }
            }
        }
        raised
    }
}

fn page_request(selector: PageSelector) -> PageRequest {
    match selector {
        PageSelector::All { page } => PageRequest::All { page },
        PageSelector::Language { escaped_name, page } => {
            PageRequest::Language { escaped_name, page }
        }
    }
}

pub fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogLoaded(Ok(metadata)) => Msg::CatalogLoaded(map_catalog(metadata)),
        EngineEvent::CatalogLoaded(Err(err)) => Msg::CatalogFailed {
            detail: err.to_string(),
        },
        EngineEvent::PageLoaded {
            request_id,
            result: Ok(records),
        } => Msg::PageLoaded {
            request_id,
            repositories: records.into_iter().map(map_repository).collect(),
        },
        EngineEvent::PageLoaded {
            request_id,
            result: Err(err),
        } => Msg::PageFailed {
            request_id,
            detail: err.to_string(),
        },
    }
}

fn map_catalog(metadata: MetadataResponse) -> Catalog {
    Catalog {
        repo_count: metadata.count_of_all_repos,
        star_count: metadata.count_of_all_stars,
        pages: metadata.all_repos_pages,
        languages: metadata
            .languages
            .into_iter()
            .map(|language| Language {
                name: language.name,
                escaped_name: language.escaped_name,
                repo_count: language.count_of_repos,
                star_count: language.count_of_stars,
                pages: language.pages,
            })
            .collect(),
    }
}

fn map_repository(record: RepositoryRecord) -> Repository {
    Repository {
        owner_login: record.owner_login,
        name: record.name,
        github_link: record.github_link,
        avatar_url: record.owner_avatar_url,
        description: record.description.unwrap_or_default(),
        homepage: record.homepage.unwrap_or_default(),
        language: record.language.unwrap_or_default(),
        stargazers: record.stargazers,
        archived: record.archived,
        license: record.license_spdx_id.unwrap_or_default(),
        created_at: record.created_at.filter(|value| !value.is_empty()),
        pushed_at: record.repo_pushed_at.filter(|value| !value.is_empty()),
    }
}
