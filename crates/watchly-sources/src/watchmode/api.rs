use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};
use watchly_models::{CatalogItem, ItemDetail, MediaKind, MediaType};
use crate::error::TransportError;

#[derive(Debug, Deserialize)]
pub(crate) struct ListTitlesResponse {
    pub page: Option<u32>,
    #[serde(default)]
    pub titles: Vec<WatchmodeTitle>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WatchmodeTitle {
    pub id: u64,
    pub title: String,
    pub year: Option<u32>,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<u64>,
    pub tmdb_type: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WatchmodeDetails {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub plot_overview: Option<String>,
    pub genre_names: Option<Vec<String>>,
    pub runtime_minutes: Option<u32>,
    pub year: Option<u32>,
    pub release_date: Option<String>,
    pub user_rating: Option<f64>,
    pub critic_score: Option<u32>,
    pub trailer: Option<String>,
}

/// Watchmode sends "" for missing strings about as often as null
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WatchmodeTitle {
    pub(crate) fn into_item(self, requested: MediaKind) -> CatalogItem {
        let media_type = self
            .item_type
            .as_deref()
            .map(MediaType::from_api)
            .unwrap_or_else(|| requested.into());

        CatalogItem {
            id: self.id,
            title: self.title,
            year: self.year,
            media_type,
            imdb_id: non_empty(self.imdb_id),
            tmdb_id: self.tmdb_id,
            tmdb_type: non_empty(self.tmdb_type),
        }
    }
}

impl WatchmodeDetails {
    pub(crate) fn into_detail(self) -> ItemDetail {
        let release_date = non_empty(self.release_date);
        ItemDetail {
            id: self.id,
            title: self.title,
            media_type: self.item_type.as_deref().map(MediaType::from_api),
            poster_url: non_empty(self.poster),
            backdrop_url: non_empty(self.backdrop),
            plot_summary: non_empty(self.plot_overview),
            genres: self.genre_names,
            runtime_minutes: self.runtime_minutes,
            year: self.year,
            critic_score: self.critic_score,
            trailer_url: non_empty(self.trailer),
            ..ItemDetail::default()
        }
        .with_user_rating(self.user_rating)
        .with_release_date(release_date.as_deref())
    }
}

/// Turn a non-2xx response into `TransportError::Http`, keeping the body for logs.
async fn check_status(response: Response, what: &str) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Failed to fetch {}: {} - {}", what, status, body);
    Err(TransportError::Http { status: status.as_u16(), body })
}

/// Fetch the first page of `list-titles` for one media kind.
pub async fn list_titles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    kind: MediaKind,
) -> Result<Vec<CatalogItem>, TransportError> {
    let url = format!("{}/list-titles", base_url);
    debug!("GET {} (types={})", url, kind);

    let response = client
        .get(&url)
        .query(&[("types", kind.as_query()), ("apiKey", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    let response = check_status(response, &format!("{} titles", kind)).await?;
    let page: ListTitlesResponse = response.json().await?;

    debug!(
        "Received {} {} titles (page {:?} of {:?}, {:?} total)",
        page.titles.len(),
        kind,
        page.page,
        page.total_pages,
        page.total_results
    );

    Ok(page.titles.into_iter().map(|t| t.into_item(kind)).collect())
}

/// Fetch `title/{id}/details`.
pub async fn get_title_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: u64,
) -> Result<ItemDetail, TransportError> {
    let url = format!("{}/title/{}/details", base_url, id);
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .query(&[("apiKey", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    let response = check_status(response, &format!("details for title {}", id)).await?;
    let details: WatchmodeDetails = response.json().await?;
    Ok(details.into_detail())
}
