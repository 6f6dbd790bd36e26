/// OMDb (Open Movie Database) provider
///
/// API Flow:
/// 1. Title search: `?apikey=..&s=<term>&type=movie` → `Search` array, absent on no match
/// 2. Featured browse: the same search with a fixed term, sampled client side
/// 3. Detail: `?apikey=..&i=<imdb id>` → one object, or an `Error` string for unknown ids
use crate::{
    config::Config,
    error::{CatalogError, CatalogResult},
    models::{MovieDetail, MovieSummary, OmdbDetail, OmdbSearchResponse},
    request_id::request_span,
    services::{featured, providers::CatalogClient},
};
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::Instrument;

const CONTENT_TYPE: &str = "movie";
const FEATURED_PAGE: &str = "1";

#[derive(Clone)]
pub struct OmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    featured_query: String,
}

impl OmdbClient {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
            featured_query: "movie".to_string(),
        }
    }

    /// Builds a client from configuration, including the transport timeout
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self::new(
            http_client,
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
        )
        .with_featured_query(config.featured_query.clone()))
    }

    /// Overrides the fixed term used for the featured browse query
    pub fn with_featured_query(mut self, featured_query: String) -> Self {
        self.featured_query = featured_query;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }

    /// Sends one GET with the API key plus `params` and returns the body text
    async fn get(&self, params: &[(&str, &str)]) -> CatalogResult<String> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Service(format!(
                "OMDb returned status {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }

    /// Runs a title search and shapes the envelope into summaries
    async fn query_titles(
        &self,
        term: &str,
        page: Option<&str>,
    ) -> CatalogResult<Vec<MovieSummary>> {
        let mut params = vec![("s", term), ("type", CONTENT_TYPE)];
        if let Some(page) = page {
            params.push(("page", page));
        }

        let body = self.get(&params).await?;
        let envelope: OmdbSearchResponse = serde_json::from_str(&body)?;

        match envelope.search {
            Some(results) => Ok(results.into_iter().map(MovieSummary::from).collect()),
            None => {
                tracing::debug!(
                    query = %term,
                    reason = envelope.error.as_deref().unwrap_or("none given"),
                    "OMDb reported no matches"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for OmdbClient {
    async fn search_by_title(&self, term: &str) -> CatalogResult<Vec<MovieSummary>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        async move {
            let titles = self.query_titles(term, None).await?;

            tracing::info!(
                query = %term,
                results = titles.len(),
                provider = "omdb",
                "Title search completed"
            );

            Ok(titles)
        }
        .instrument(request_span("search_by_title"))
        .await
    }

    async fn sample_featured(&self, count: usize) -> CatalogResult<Vec<MovieSummary>> {
        async move {
            let browsed = self
                .query_titles(&self.featured_query, Some(FEATURED_PAGE))
                .await?;
            let available = browsed.len();
            let sampled = featured::sample(browsed, count, &mut rand::thread_rng());

            tracing::info!(
                available = available,
                sampled = sampled.len(),
                provider = "omdb",
                "Featured sample drawn"
            );

            Ok(sampled)
        }
        .instrument(request_span("sample_featured"))
        .await
    }

    async fn fetch_detail(&self, id: &str) -> CatalogResult<MovieDetail> {
        async move {
            let body = self.get(&[("i", id)]).await?;

            let raw: OmdbDetail = serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, imdb_id = %id, "Failed to deserialize OMDb detail");
                CatalogError::from(e)
            })?;
            let detail = raw.into_detail(id)?;

            tracing::info!(imdb_id = %id, provider = "omdb", "Detail fetched");

            Ok(detail)
        }
        .instrument(request_span("fetch_detail"))
        .await
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
