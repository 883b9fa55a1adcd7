//! Incremental paginated search over a [`PhotoSearch`] client.
//!
//! The service owns all pagination state. The presentation layer drives it
//! through [`SearchService::set_query`] and [`SearchService::trigger_next_page`]
//! and observes it through the broadcast event bus plus read-only snapshots;
//! nothing outside this module mutates the state.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::clients::{PhotoSearch, SearchError};
use crate::domain::SearchQuery;
use crate::domain::events::StreamEvent;
use crate::models::photo::Photo;

/// Lifecycle phase of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query set, no results.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Results (possibly zero) are present and no fetch is in flight.
    Ready,
    /// The last fetch failed; earlier pages remain visible.
    Error,
}

#[derive(Debug)]
struct PaginationState {
    phase: SearchPhase,
    query: Option<SearchQuery>,
    photos: Vec<Photo>,
    /// Result count recorded when the last next-page fetch was issued.
    /// Suppresses duplicate near-end triggers until the list grows past it.
    last_requested_count: usize,
    /// Bumped by every `set_query`; a response is applied only while its
    /// captured generation is still current.
    generation: u64,
}

impl PaginationState {
    const fn new() -> Self {
        Self {
            phase: SearchPhase::Idle,
            query: None,
            photos: Vec::new(),
            last_requested_count: 0,
            generation: 0,
        }
    }
}

/// Paginated search service: decides for every trigger whether to reset
/// accumulated results, advance the page counter, and invoke the client.
pub struct SearchService {
    client: Arc<dyn PhotoSearch>,
    state: RwLock<PaginationState>,
    events: broadcast::Sender<StreamEvent>,
}

impl SearchService {
    #[must_use]
    pub fn new(client: Arc<dyn PhotoSearch>, event_buffer_size: usize) -> Self {
        let (events, _) = broadcast::channel(event_buffer_size);
        Self {
            client,
            state: RwLock::new(PaginationState::new()),
            events,
        }
    }

    /// Subscribe to state-change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StreamEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the accumulated results, in page order.
    pub async fn photos(&self) -> Vec<Photo> {
        self.state.read().await.photos.clone()
    }

    pub async fn phase(&self) -> SearchPhase {
        self.state.read().await.phase
    }

    pub async fn is_loading(&self) -> bool {
        self.phase().await == SearchPhase::Loading
    }

    /// Text of the current query, if one has been set.
    pub async fn current_text(&self) -> Option<String> {
        self.state
            .read()
            .await
            .query
            .as_ref()
            .map(|q| q.text.clone())
    }

    /// Starts a new search, superseding any fetch still in flight.
    ///
    /// Always treated as a fresh search: accumulated results are cleared and
    /// pagination restarts from the first page, even when `text` equals the
    /// previous query. Empty or whitespace-only text yields
    /// [`SearchError::InvalidQuery`] immediately, without touching the
    /// network or entering the loading phase.
    pub async fn set_query(&self, text: &str) -> Result<(), SearchError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            let error = SearchError::InvalidQuery;
            self.notify(StreamEvent::SearchFailed {
                error: error.clone(),
            });
            return Err(error);
        }

        let query = SearchQuery::first_page(trimmed);
        let token = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.photos.clear();
            state.last_requested_count = 0;
            state.query = Some(query.clone());
            state.phase = SearchPhase::Loading;
            state.generation
        };

        self.notify(StreamEvent::LoadingChanged { is_loading: true });
        self.fetch(query, token).await
    }

    /// Near-end-of-list signal from the presentation layer.
    ///
    /// Fires a next-page fetch only when results are ready,
    /// `last_visible_index` is within one position of the end of the
    /// accumulated list, and the list has grown since the previous next-page
    /// request. Returns whether a fetch was issued.
    pub async fn trigger_next_page(&self, last_visible_index: usize) -> Result<bool, SearchError> {
        let (query, token) = {
            let mut state = self.state.write().await;
            if state.phase != SearchPhase::Ready {
                return Ok(false);
            }
            let Some(current) = state.query.as_ref() else {
                return Ok(false);
            };
            if last_visible_index + 1 < state.photos.len() {
                return Ok(false);
            }
            if state.last_requested_count >= state.photos.len() {
                debug!("next-page trigger suppressed by high-water mark");
                return Ok(false);
            }

            let next = current.next_page();
            state.last_requested_count = state.photos.len();
            state.query = Some(next.clone());
            state.phase = SearchPhase::Loading;
            (next, state.generation)
        };

        self.notify(StreamEvent::LoadingChanged { is_loading: true });
        self.fetch(query, token).await.map(|()| true)
    }

    /// Runs the fetch for `query` and applies the outcome only if `token` is
    /// still the current generation. A superseded response mutates nothing
    /// and fires no notifications.
    async fn fetch(&self, query: SearchQuery, token: u64) -> Result<(), SearchError> {
        let result = self.client.search(&query.text, query.page).await;

        let mut state = self.state.write().await;
        if state.generation != token {
            debug!(page = query.page, "discarding superseded response");
            return Ok(());
        }

        match result {
            Ok(photos) => {
                if photos.is_empty() {
                    debug!(page = query.page, "no more results");
                }
                state.photos.extend(photos);
                state.phase = SearchPhase::Ready;
                let snapshot = state.photos.clone();
                drop(state);

                self.notify(StreamEvent::ResultsChanged { photos: snapshot });
                self.notify(StreamEvent::LoadingChanged { is_loading: false });
                Ok(())
            }
            Err(error) => {
                state.phase = SearchPhase::Error;
                drop(state);
                warn!(page = query.page, "search failed: {error}");

                self.notify(StreamEvent::LoadingChanged { is_loading: false });
                self.notify(StreamEvent::SearchFailed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn notify(&self, event: StreamEvent) {
        // A send only fails when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }
}
