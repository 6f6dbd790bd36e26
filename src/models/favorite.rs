use serde::{Deserialize, Serialize};

use super::{deserialize_na_as_none, MovieSummary};

/// A favorite as persisted in the store
///
/// Field names follow the OMDb casing so that lists written by earlier versions
/// of the browser hydrate unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "deserialize_na_as_none")]
    pub poster_url: Option<String>,
}

impl From<&MovieSummary> for FavoriteEntry {
    fn from(summary: &MovieSummary) -> Self {
        Self {
            id: summary.id.clone(),
            title: summary.title.clone(),
            year: summary.year.clone(),
            poster_url: summary.poster_url.clone(),
        }
    }
}

impl From<&FavoriteEntry> for MovieSummary {
    fn from(entry: &FavoriteEntry) -> Self {
        MovieSummary {
            id: entry.id.clone(),
            title: entry.title.clone(),
            year: entry.year.clone(),
            poster_url: entry.poster_url.clone(),
        }
    }
}
