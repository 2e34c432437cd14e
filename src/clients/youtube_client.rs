use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{VideoSearchQuery, VideoStatistics},
};

use super::ensure_success;

const SERVICE_NAME: &str = "YouTube Data API";

/// Video-sharing platform collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Returns video ids in the provider's ranking order.
    async fn search(&self, query: &VideoSearchQuery) -> AppResult<Vec<String>>;
    async fn statistics(&self, video_ids: &[String]) -> AppResult<Vec<VideoStatistics>>;
}

pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl YouTubeClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            api_key: config.youtube_api_key.clone(),
        }
    }
}

#[async_trait]
impl VideoProvider for YouTubeClient {
    async fn search(&self, query: &VideoSearchQuery) -> AppResult<Vec<String>> {
        let max_results = query.max_results.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("q", query.query.as_str()),
            ("maxResults", max_results.as_str()),
            ("relevanceLanguage", query.relevance_language.as_str()),
            ("videoCategoryId", query.category_id.as_str()),
            ("order", "relevance"),
            ("key", self.api_key.expose_secret()),
        ];
        if query.embeddable_only {
            params.push(("videoEmbeddable", "true"));
        }

        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::VideoSearch(format!("Search request failed: {}", e)))?;

        let body: SearchListResponse = ensure_success(response, SERVICE_NAME, AppError::VideoSearch)
            .await?
            .json()
            .await
            .map_err(|e| AppError::VideoSearch(format!("Invalid search response: {}", e)))?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    async fn statistics(&self, video_ids: &[String]) -> AppResult<Vec<VideoStatistics>> {
        let ids = video_ids.join(",");

        let response = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("part", "statistics"),
                ("id", ids.as_str()),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| AppError::VideoSearch(format!("Statistics request failed: {}", e)))?;

        let body: VideoListResponse = ensure_success(response, SERVICE_NAME, AppError::VideoSearch)
            .await?
            .json()
            .await
            .map_err(|e| AppError::VideoSearch(format!("Invalid statistics response: {}", e)))?;

        Ok(body
            .items
            .into_iter()
            .map(|item| {
                let stats = item.statistics.unwrap_or_default();
                VideoStatistics::new(item.id, stats.view_count, stats.like_count)
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    statistics: Option<Statistics>,
}

// counters arrive as decimal strings and are omitted when hidden
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default, deserialize_with = "count_from_string")]
    view_count: u64,
    #[serde(default, deserialize_with = "count_from_string")]
    like_count: u64,
}

fn count_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<Count>::deserialize(deserializer)? {
        Some(Count::Text(text)) => text.trim().parse().unwrap_or(0),
        Some(Count::Number(n)) => n,
        None => 0,
    })
}
