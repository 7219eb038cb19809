use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// Summary record returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub year: Option<u32>,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    /// TMDB namespace the `tmdb_id` belongs to ("movie" or "tv").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_type: Option<String>,
}

impl CatalogItem {
    pub fn new(id: u64, title: impl Into<String>, year: Option<u32>, media_type: MediaType) -> Self {
        Self {
            id,
            title: title.into(),
            year,
            media_type,
            imdb_id: None,
            tmdb_id: None,
            tmdb_type: None,
        }
    }

    /// "Title (Year)" when the year is known.
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}
