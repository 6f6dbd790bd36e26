use serde::{Deserialize, Serialize};

/// A title as returned by search and featured queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    /// Opaque external identifier (an IMDb id such as `tt0372784`)
    pub id: String,
    pub title: String,
    pub year: String,
    /// Absent when the service has no poster for the title
    pub poster_url: Option<String>,
}

impl MovieSummary {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster_url: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url,
        }
    }
}

/// Full metadata for a single title
///
/// Every field beyond the summary is optional because the service omits (or
/// reports `N/A` for) whatever it does not know.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub rating: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub plot: Option<String>,
}

impl MovieDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }
}
