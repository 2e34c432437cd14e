use std::sync::Arc;

use crate::{
    clients::{GeminiClient, GenerativeModel, VideoProvider, YouTubeClient},
    config::Config,
    errors::AppResult,
    services::generation_service::GenerationService,
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        let model = Arc::new(GeminiClient::new(http.clone(), config));
        let video_provider = Arc::new(YouTubeClient::new(http, config));

        Ok(Self::from_parts(model, video_provider))
    }

    /// Wires the state from explicit collaborators; tests pass fakes here.
    pub fn from_parts(
        model: Arc<dyn GenerativeModel>,
        video_provider: Arc<dyn VideoProvider>,
    ) -> Self {
        Self {
            generation_service: Arc::new(GenerationService::new(model, video_provider)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_from_config() {
        let state = AppState::new(&Config::test_config()).unwrap();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.generation_service, &clone.generation_service));
    }
}
