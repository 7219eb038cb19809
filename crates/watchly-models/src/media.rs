use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type as reported by the catalog for a single title.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    TvSeries,
    Other,
}

impl MediaType {
    /// Map the upstream `type` string. Anything that is not a movie or a series
    /// (specials, miniseries, shorts) lands in `Other`.
    pub fn from_api(value: &str) -> Self {
        match value {
            "movie" => MediaType::Movie,
            "tv_series" => MediaType::TvSeries,
            _ => MediaType::Other,
        }
    }
}

/// The two kinds the list endpoint can be asked for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    TvSeries,
}

impl MediaKind {
    /// Value of the `types` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::TvSeries => "tv_series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => MediaType::Movie,
            MediaKind::TvSeries => MediaType::TvSeries,
        }
    }
}
