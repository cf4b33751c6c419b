pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::extraction::{handle_extract, MAX_UPLOAD_BYTES};
use crate::history::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/analyze", post(handle_analyze))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/v1/analyze", post(handle_analyze))
        // History API
        .route(
            "/api/v1/analyses",
            get(handlers::handle_list_analyses).post(handlers::handle_save_analysis),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        // Resume upload
        .route(
            "/api/v1/resume/extract",
            post(handle_extract).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::orchestrator::Analyzer;
    use crate::history::store::memory::InMemoryHistoryStore;
    use crate::llm_client::fake::FakeCompletion;
    use crate::llm_client::{CompletionError, CompletionService};

    fn app_with(completion: Option<FakeCompletion>) -> Router {
        let completion = completion.map(|fake| Arc::new(fake) as Arc<dyn CompletionService>);
        build_router(AppState {
            analyzer: Analyzer::new(completion),
            history: Arc::new(InMemoryHistoryStore::default()),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn analyze_body(mode: &str) -> Value {
        json!({
            "resumeText": "Jane Doe. Six years of Rust.",
            "jobDesc": "Senior engineer. Rust, Kubernetes.",
            "analysisType": mode,
            "additionalInfo": ""
        })
    }

    #[tokio::test]
    async fn test_cover_letter_end_to_end() {
        let letter = "Dear [Hiring Manager's Name],\n\nI am writing to apply...";
        let app = app_with(Some(FakeCompletion::replying(letter)));

        let (status, body) = send(&app, post_json("/analyze", analyze_body("cover-letter"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "analysisType": "cover-letter", "content": letter})
        );
    }

    #[tokio::test]
    async fn test_analyze_mode_returns_parsed_fields() {
        let app = app_with(Some(FakeCompletion::replying(
            "MATCH_SCORE: 64\n\nMISSING_KEYWORDS: Kubernetes, Helm\n\nREWRITTEN_SUMMARY: Rust engineer.\n\n",
        )));

        let (status, body) = send(&app, post_json("/api/analyze", analyze_body("analyze"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["analysisType"], "analyze");
        assert_eq!(body["matchScore"], 64);
        assert_eq!(body["missingKeywords"], "Kubernetes, Helm");
        assert_eq!(body["rewrittenSummary"], "Rust engineer.");
    }

    #[tokio::test]
    async fn test_missing_job_description_is_400() {
        let app = app_with(Some(FakeCompletion::replying("unused")));
        for mode in ["analyze", "cover-letter", "rewrite-resume"] {
            let mut body = analyze_body(mode);
            body.as_object_mut().unwrap().remove("jobDesc");
            let (status, body) = send(&app, post_json("/analyze", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_invalid_mode_is_400() {
        let app = app_with(Some(FakeCompletion::replying("unused")));
        let (status, body) = send(&app, post_json("/analyze", analyze_body("invalid-mode"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid analysis type");
    }

    #[tokio::test]
    async fn test_missing_credential_is_500_even_for_bad_body() {
        let app = app_with(None);
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API key not configured");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_when_configured() {
        let app = app_with(Some(FakeCompletion::replying("unused")));
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_backend_quota_is_429() {
        let app = app_with(Some(FakeCompletion::failing(|| CompletionError::Backend {
            status: 429,
            message: "{\"error\": {\"status\": \"RESOURCE_EXHAUSTED\"}}".to_string(),
        })));
        let (status, body) = send(&app, post_json("/analyze", analyze_body("analyze"))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "API quota exceeded. Please try again later.");
    }

    #[tokio::test]
    async fn test_backend_bad_key_is_401() {
        let app = app_with(Some(FakeCompletion::failing(|| CompletionError::Backend {
            status: 400,
            message: "API key not valid. [reason: API_KEY_INVALID]".to_string(),
        })));
        let (status, _) = send(&app, post_json("/analyze", analyze_body("rewrite-resume"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_backend_response_is_500() {
        let app = app_with(Some(FakeCompletion::failing(|| {
            CompletionError::MalformedResponse
        })));
        let (status, body) = send(&app, post_json("/analyze", analyze_body("analyze"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Analysis failed:"));
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let (status, body) = send(&app_with(None), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["completionConfigured"], false);
    }

    #[tokio::test]
    async fn test_save_then_list_and_get_history() {
        let app = app_with(Some(FakeCompletion::replying("unused")));

        for title in ["Backend Engineer", "Platform Engineer"] {
            let (status, _) = send(
                &app,
                post_json(
                    "/api/v1/analyses",
                    json!({
                        "ownerId": "uid-1",
                        "analysisType": "analyze",
                        "jobTitle": title,
                        "company": "Acme",
                        "jobDescription": "Rust",
                        "resumeText": "Jane",
                        "result": {"success": true, "matchScore": 80}
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, list) = send(&app, get_request("/api/v1/analyses?ownerId=uid-1&limit=10")).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap().clone();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["jobTitle"], "Platform Engineer");
        assert_eq!(list[0]["matchScore"], 80);
        assert!(list[0].get("resumeText").is_none());

        let id = list[0]["id"].as_str().unwrap();
        let (status, record) =
            send(&app, get_request(&format!("/api/v1/analyses/{id}?ownerId=uid-1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["resumeText"], "Jane");

        let (status, _) = send(&app, get_request(&format!("/api/v1/analyses/{id}?ownerId=uid-2"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    fn multipart_upload(file: &[u8]) -> Request<Body> {
        let boundary = "resume-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(file);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let app = app_with(None);
        let file = vec![b'a'; MAX_UPLOAD_BYTES + 1024];
        let (status, body) = send(&app, multipart_upload(&file)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], crate::extraction::TOO_LARGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_unreadable_upload_is_400() {
        let app = app_with(None);
        let (status, body) = send(&app, multipart_upload(b"not a pdf")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], crate::extraction::UNREADABLE_PDF_MESSAGE);
    }

    #[tokio::test]
    async fn test_list_without_owner_is_400() {
        let app = app_with(None);
        let (status, _) = send(&app, get_request("/api/v1/analyses")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
