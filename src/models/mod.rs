use serde::{Deserialize, Deserializer};

use crate::error::CatalogError;

pub mod favorite;
pub mod movie;
pub mod theme;

pub use favorite::FavoriteEntry;
pub use movie::{MovieDetail, MovieSummary};
pub use theme::ThemeMode;

/// OMDb reports unknown values as the literal `N/A`
const NOT_AVAILABLE: &str = "N/A";

/// Deserializes an optional string, treating `N/A` and blanks as absent
pub(crate) fn deserialize_na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty() && v != NOT_AVAILABLE))
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw search envelope returned by OMDb for `s=` queries
///
/// `Search` is missing when the service found nothing; `Error` then carries a
/// human-readable reason such as "Movie not found!".
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbSummary>>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Raw summary entry inside an OMDb search envelope
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_na_as_none")]
    pub poster: Option<String>,
}

impl From<OmdbSummary> for MovieSummary {
    fn from(raw: OmdbSummary) -> Self {
        MovieSummary {
            id: raw.imdb_id,
            title: raw.title,
            year: raw.year,
            poster_url: raw.poster,
        }
    }
}

/// Raw detail object returned by OMDb for `i=` lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbDetail {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_na_as_none")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "deserialize_na_as_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "deserialize_na_as_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "deserialize_na_as_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "deserialize_na_as_none")]
    pub director: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "deserialize_na_as_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "deserialize_na_as_none")]
    pub plot: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbDetail {
    /// Converts the raw lookup result for `requested_id` into a typed detail
    pub fn into_detail(self, requested_id: &str) -> Result<MovieDetail, CatalogError> {
        if let Some(error) = self.error {
            return Err(CatalogError::NotFound(format!("{}: {}", requested_id, error)));
        }

        let id = self.imdb_id.ok_or_else(|| {
            CatalogError::Service("Detail response missing imdbID".to_string())
        })?;
        let title = self.title.ok_or_else(|| {
            CatalogError::Service("Detail response missing Title".to_string())
        })?;

        Ok(MovieDetail {
            summary: MovieSummary {
                id,
                title,
                year: self.year.unwrap_or_default(),
                poster_url: self.poster,
            },
            rating: self.imdb_rating,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            cast: self.actors,
            plot: self.plot,
        })
    }
}
