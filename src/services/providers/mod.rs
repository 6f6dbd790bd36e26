/// Remote catalog abstraction
///
/// The session only talks to the metadata service through [`CatalogClient`], so the
/// OMDb implementation can be swapped for a mock in tests. Every call is a single
/// attempt: no retries, no caching, a result or a typed error.
use crate::{
    error::CatalogResult,
    models::{MovieDetail, MovieSummary},
};

pub mod omdb;

pub use omdb::OmdbClient;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search for movies by title
    ///
    /// A search the service answers with "no matches" yields an empty list.
    async fn search_by_title(&self, term: &str) -> CatalogResult<Vec<MovieSummary>>;

    /// Run the fixed browse query and return at most `count` of its results in
    /// random order
    async fn sample_featured(&self, count: usize) -> CatalogResult<Vec<MovieSummary>>;

    /// Fetch full metadata for one title
    async fn fetch_detail(&self, id: &str) -> CatalogResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
