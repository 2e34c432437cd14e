use std::{io::Write, sync::Arc};

use secrecy::SecretString;
use studyforge_server::{
    clients::{GeminiClient, GenerativeModel, VideoProvider, YouTubeClient},
    config::Config,
    errors::AppError,
    models::domain::{PromptPart, ProcessingMode, VideoSearchQuery},
    services::{
        output_formatter::format, prompt_builder::build_prompt, text_normalizer::normalize,
        video_search_service::VideoSearchService,
    },
};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(server: &MockServer) -> Config {
    Config {
        gemini_api_key: SecretString::from("gemini-key".to_string()),
        gemini_model: "gemini-test".to_string(),
        gemini_base_url: server.uri(),
        youtube_api_key: SecretString::from("youtube-key".to_string()),
        youtube_base_url: server.uri(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
        upload_dir: std::env::temp_dir(),
        max_upload_bytes: 1024 * 1024,
        max_pdf_text_bytes: 64 * 1024,
        http_timeout_secs: 10,
        file_activation_timeout_secs: 10,
        cors_allowed_origin: None,
    }
}

#[tokio::test]
async fn gemini_generate_sends_prompt_and_joins_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "gemini-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Explain osmosis" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Osmosis is " }, { "text": "diffusion of water." }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server));
    let text = client
        .generate(vec![PromptPart::Text("Explain osmosis".to_string())])
        .await
        .unwrap();

    assert_eq!(text, "Osmosis is diffusion of water.");
}

#[tokio::test]
async fn gemini_api_errors_become_model_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server));
    let err = client
        .generate(vec![PromptPart::Text("hi".to_string())])
        .await
        .unwrap_err();

    match err {
        AppError::Model(detail) => assert!(detail.contains("API key not valid"), "{}", detail),
        other => panic!("expected model error, got {:?}", other),
    }
}

#[tokio::test]
async fn gemini_upload_waits_for_file_to_become_active() {
    let server = MockServer::start().await;
    let session_url = format!("{}/resumable/session-1", server.uri());

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .and(header("x-goog-upload-command", "start"))
        .and(header("x-goog-upload-header-content-type", "image/png"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("x-goog-upload-url", session_url.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/resumable/session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "file": {
                "name": "files/diagram",
                "uri": "https://files.example/diagram",
                "mimeType": "image/png",
                "state": "PROCESSING"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1beta/files/diagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "files/diagram",
            "uri": "https://files.example/diagram",
            "mimeType": "image/png",
            "state": "ACTIVE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut staged = tempfile::NamedTempFile::new().unwrap();
    staged.write_all(b"\x89PNG fake image").unwrap();

    let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server));
    let handle = client
        .upload_file(staged.path(), "image/png", "diagram.png")
        .await
        .unwrap();

    assert_eq!(handle.name, "files/diagram");
    assert_eq!(handle.uri, "https://files.example/diagram");
    assert_eq!(handle.mime_type, "image/png");
}

#[tokio::test]
async fn gemini_upload_without_session_url_is_an_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let staged = tempfile::NamedTempFile::new().unwrap();
    let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server));
    let err = client
        .upload_file(staged.path(), "audio/mpeg", "lecture.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(_)));
}

#[tokio::test]
async fn youtube_search_keeps_only_engaging_videos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "photosynthesis explained"))
        .and(query_param("type", "video"))
        .and(query_param("videoEmbeddable", "true"))
        .and(query_param("videoCategoryId", "27"))
        .and(query_param("maxResults", "4"))
        .and(query_param("key", "youtube-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "popular" } },
                { "id": { "kind": "youtube#video", "videoId": "obscure" } },
                { "id": { "kind": "youtube#video", "videoId": "disliked" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "statistics"))
        .and(query_param("id", "popular,obscure,disliked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "id": "popular", "statistics": { "viewCount": "5000", "likeCount": "100" } },
                { "id": "obscure", "statistics": { "viewCount": "500", "likeCount": "400" } },
                { "id": "disliked", "statistics": { "viewCount": "2000", "likeCount": "10" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = YouTubeClient::new(reqwest::Client::new(), &config_for(&server));
    let service = VideoSearchService::new(Arc::new(client));
    let urls = service.search_videos("photosynthesis explained").await.unwrap();

    assert_eq!(urls, vec!["https://www.youtube.com/embed/popular".to_string()]);
}

#[tokio::test]
async fn youtube_quota_errors_become_video_search_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    let client = YouTubeClient::new(reqwest::Client::new(), &config_for(&server));
    let query = VideoSearchQuery {
        query: "gravity".to_string(),
        max_results: 4,
        category_id: "27".to_string(),
        relevance_language: "en".to_string(),
        embeddable_only: true,
    };

    assert!(matches!(
        client.search(&query).await,
        Err(AppError::VideoSearch(_))
    ));
}

#[cfg(test)]
mod sync_tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Mitochondria   (the powerhouse) #cell!");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_format_leaves_plain_text_alone() {
        assert_eq!(format("plain sentence without markup."), "plain sentence without markup.");
    }

    #[test]
    fn test_quiz_prompt_mentions_size_and_text() {
        let prompt = build_prompt(ProcessingMode::Quiz, "plate tectonics", 7);
        assert!(prompt.contains('7'));
        assert!(prompt.contains("plate tectonics"));
    }

    #[test]
    fn test_unknown_option_uses_analyze_prompt() {
        let unknown = build_prompt(ProcessingMode::from_option("summarize"), "x", 5);
        assert_eq!(unknown, build_prompt(ProcessingMode::Analyze, "x", 5));
    }
}
