use std::{collections::HashMap, sync::Arc};

use crate::{
    clients::VideoProvider,
    errors::AppResult,
    models::domain::{VideoSearchQuery, VideoStatistics},
};

const MAX_RESULTS: u32 = 4;
// YouTube's "Education" category
const EDUCATION_CATEGORY_ID: &str = "27";
const RELEVANCE_LANGUAGE: &str = "en";
const MIN_VIEW_COUNT: u64 = 1000;
const MIN_LIKE_RATIO: f64 = 0.01;
const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";

pub struct VideoSearchService {
    provider: Arc<dyn VideoProvider>,
}

impl VideoSearchService {
    pub fn new(provider: Arc<dyn VideoProvider>) -> Self {
        Self { provider }
    }

    /// Finds up to four embeddable education videos for `query` that pass the
    /// engagement filter, as embed URLs in relevance order.
    pub async fn search_videos(&self, query: &str) -> AppResult<Vec<String>> {
        log::info!("Searching videos for: {}", query);

        let search = VideoSearchQuery {
            query: query.to_string(),
            max_results: MAX_RESULTS,
            category_id: EDUCATION_CATEGORY_ID.to_string(),
            relevance_language: RELEVANCE_LANGUAGE.to_string(),
            embeddable_only: true,
        };

        let video_ids = self.provider.search(&search).await?;
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let statistics = self.provider.statistics(&video_ids).await?;
        let urls: Vec<String> = filter_popular(&video_ids, &statistics)
            .into_iter()
            .map(|id| format!("{}{}", EMBED_URL_PREFIX, id))
            .collect();

        log::info!("Video search kept {} of {} results", urls.len(), video_ids.len());
        Ok(urls)
    }
}

pub fn passes_engagement(stats: &VideoStatistics) -> bool {
    stats.view_count > MIN_VIEW_COUNT
        && (stats.like_count as f64 / stats.view_count as f64) > MIN_LIKE_RATIO
}

/// Keeps the ids whose statistics pass the engagement heuristic, preserving
/// the order of `video_ids`. Ids without statistics are dropped.
pub fn filter_popular(video_ids: &[String], statistics: &[VideoStatistics]) -> Vec<String> {
    let by_id: HashMap<&str, &VideoStatistics> = statistics
        .iter()
        .map(|stats| (stats.video_id.as_str(), stats))
        .collect();

    video_ids
        .iter()
        .filter(|id| by_id.get(id.as_str()).is_some_and(|stats| passes_engagement(stats)))
        .cloned()
        .collect()
}
