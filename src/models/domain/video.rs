/// Parameters of a provider-side video search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSearchQuery {
    pub query: String,
    pub max_results: u32,
    pub category_id: String,
    pub relevance_language: String,
    pub embeddable_only: bool,
}

/// Engagement numbers for one video. Hidden counters are reported as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoStatistics {
    pub video_id: String,
    pub view_count: u64,
    pub like_count: u64,
}

impl VideoStatistics {
    pub fn new(video_id: impl Into<String>, view_count: u64, like_count: u64) -> Self {
        Self {
            video_id: video_id.into(),
            view_count,
            like_count,
        }
    }
}
