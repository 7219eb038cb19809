use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// Full record for one catalog item. Upstream data is sparse, so nearly
/// everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub id: u64,
    pub title: String,
    pub media_type: Option<MediaType>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub plot_summary: Option<String>,
    pub genres: Option<Vec<String>>,
    pub runtime_minutes: Option<u32>,
    pub year: Option<u32>,
    pub release_date: Option<NaiveDate>,
    pub user_rating: Option<f64>, // 0-10
    pub critic_score: Option<u32>,
    pub trailer_url: Option<String>,
}

impl ItemDetail {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Ratings outside 0-10 are dropped rather than clamped.
    pub fn with_user_rating(mut self, rating: Option<f64>) -> Self {
        self.user_rating = rating.filter(|r| r.is_finite() && (0.0..=10.0).contains(r));
        self
    }

    /// Accepts `YYYY-MM-DD`; anything else leaves the date unset.
    pub fn with_release_date(mut self, date: Option<&str>) -> Self {
        self.release_date = date.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());
        self
    }

    /// Runtime rendered as "2h 15m" / "45m".
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime_minutes.map(|minutes| {
            let (hours, rest) = (minutes / 60, minutes % 60);
            if hours > 0 {
                format!("{}h {}m", hours, rest)
            } else {
                format!("{}m", rest)
            }
        })
    }

    pub fn genres_label(&self) -> Option<String> {
        self.genres
            .as_ref()
            .filter(|genres| !genres.is_empty())
            .map(|genres| genres.join(", "))
    }
}
