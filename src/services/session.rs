use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

use crate::{
    error::{CatalogError, ErrorKind},
    models::{MovieDetail, MovieSummary},
    services::providers::CatalogClient,
};

/// Which result set the presentation layer should display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultView {
    /// Random sample drawn at startup
    #[default]
    Featured,
    /// Results of the most recent applied search
    Search { term: String },
}

/// Session operations that report failures through [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Search,
    SelectDetail,
}

/// Transient, non-blocking failure report for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
}

pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// What happened to a fetch-initiating call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the relevant state
    Applied,
    /// Nothing was fetched (blank search term)
    Skipped,
    /// A newer request of the same kind was issued while this one was in flight
    Stale,
    /// The fetch failed and prior state was kept
    Failed,
}

#[derive(Debug, Clone, Copy)]
enum Facet {
    Featured,
    Search,
    Detail,
}

#[derive(Default)]
struct SessionState {
    view: ResultView,
    featured: Vec<MovieSummary>,
    search_results: Vec<MovieSummary>,
    selection: Option<MovieDetail>,
    featured_generation: u64,
    search_generation: u64,
    detail_generation: u64,
}

impl SessionState {
    fn generation_mut(&mut self, facet: Facet) -> &mut u64 {
        match facet {
            Facet::Featured => &mut self.featured_generation,
            Facet::Search => &mut self.search_generation,
            Facet::Detail => &mut self.detail_generation,
        }
    }

    fn generation(&self, facet: Facet) -> u64 {
        match facet {
            Facet::Featured => self.featured_generation,
            Facet::Search => self.search_generation,
            Facet::Detail => self.detail_generation,
        }
    }

    /// Advances the counter for `facet` and returns the new token
    fn bump(&mut self, facet: Facet) -> u64 {
        let generation = self.generation_mut(facet);
        *generation = generation.wrapping_add(1);
        *generation
    }

    fn is_current(&self, facet: Facet, token: u64) -> bool {
        self.generation(facet) == token
    }
}

/// Featured/search result views plus the single open detail
///
/// Cloning is cheap and every clone shares the same state, so a search can be
/// in flight on one task while another reads the current view. Each facet keeps
/// a generation counter; a response is applied only if no newer request of the
/// same kind was issued after it, otherwise it is dropped.
#[derive(Clone)]
pub struct CatalogSession {
    client: Arc<dyn CatalogClient>,
    state: Arc<RwLock<SessionState>>,
    notices: mpsc::UnboundedSender<Notice>,
    featured_count: usize,
}

impl CatalogSession {
    /// Creates a session and the receiving end of its notification channel
    pub fn new(
        client: Arc<dyn CatalogClient>,
        featured_count: usize,
    ) -> (Self, NoticeReceiver) {
        let (notices, notice_rx) = mpsc::unbounded_channel();

        let session = Self {
            client,
            state: Arc::new(RwLock::new(SessionState::default())),
            notices,
            featured_count,
        };

        (session, notice_rx)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a new request token for `facet`
    fn begin(&self, facet: Facet) -> u64 {
        self.write().bump(facet)
    }

    fn notify(&self, operation: Operation, error: &CatalogError) {
        let notice = Notice {
            operation,
            kind: error.kind(),
            message: error.to_string(),
        };

        if self.notices.send(notice).is_err() {
            tracing::debug!("No listener for session notices");
        }
    }

    /// Draws the featured sample
    ///
    /// Failure is only logged; the featured set stays as it was (empty at startup).
    pub async fn load_featured(&self) -> FetchOutcome {
        let token = self.begin(Facet::Featured);
        let result = self.client.sample_featured(self.featured_count).await;

        let mut state = self.write();
        if !state.is_current(Facet::Featured, token) {
            tracing::debug!(generation = token, "Discarding stale featured sample");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(featured) => {
                tracing::info!(count = featured.len(), "Featured set loaded");
                state.featured = featured;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.client.name(),
                    "Featured sample failed, featured set left unchanged"
                );
                FetchOutcome::Failed
            }
        }
    }

    /// Searches by title and, on success, switches the view to the results
    ///
    /// A blank term is a no-op. An empty successful result still switches the
    /// view, so "no results" is distinguishable from "not searched".
    pub async fn search(&self, term: &str) -> FetchOutcome {
        let term = term.trim();
        if term.is_empty() {
            tracing::debug!("Ignoring blank search term");
            return FetchOutcome::Skipped;
        }

        let token = self.begin(Facet::Search);
        let result = self.client.search_by_title(term).await;

        let mut state = self.write();
        if !state.is_current(Facet::Search, token) {
            tracing::debug!(
                query = %term,
                generation = token,
                current = state.search_generation,
                "Discarding stale search response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(results) => {
                tracing::info!(query = %term, results = results.len(), "Search applied");
                state.view = ResultView::Search {
                    term: term.to_string(),
                };
                state.search_results = results;
                FetchOutcome::Applied
            }
            Err(e) => {
                drop(state);
                tracing::warn!(
                    error = %e,
                    query = %term,
                    "Search failed, keeping previous results"
                );
                self.notify(Operation::Search, &e);
                FetchOutcome::Failed
            }
        }
    }

    /// Opens the detail overlay for `id`
    ///
    /// On failure the current selection (open or not) is left in place.
    pub async fn select_detail(&self, id: &str) -> FetchOutcome {
        let token = self.begin(Facet::Detail);
        let result = self.client.fetch_detail(id).await;

        let mut state = self.write();
        if !state.is_current(Facet::Detail, token) {
            tracing::debug!(imdb_id = %id, generation = token, "Discarding stale detail");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(detail) => {
                state.selection = Some(detail);
                FetchOutcome::Applied
            }
            Err(e) => {
                drop(state);
                tracing::warn!(error = %e, imdb_id = %id, "Detail lookup failed");
                self.notify(Operation::SelectDetail, &e);
                FetchOutcome::Failed
            }
        }
    }

    /// Closes the detail overlay
    ///
    /// Also invalidates any detail fetch still in flight.
    pub fn clear_selection(&self) {
        let mut state = self.write();
        state.selection = None;
        state.bump(Facet::Detail);
    }

    pub fn view(&self) -> ResultView {
        self.read().view.clone()
    }

    pub fn featured(&self) -> Vec<MovieSummary> {
        self.read().featured.clone()
    }

    pub fn search_results(&self) -> Vec<MovieSummary> {
        self.read().search_results.clone()
    }

    /// The result set for the active view
    pub fn displayed(&self) -> Vec<MovieSummary> {
        let state = self.read();
        match state.view {
            ResultView::Featured => state.featured.clone(),
            ResultView::Search { .. } => state.search_results.clone(),
        }
    }

    pub fn selection(&self) -> Option<MovieDetail> {
        self.read().selection.clone()
    }
}
