use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use leadscout_common::LeadScoutError;
use leadscout_pipeline::jobs::sources::extract_post_id;

use crate::AppState;

#[derive(Deserialize)]
pub struct PostRequest {
    post_url: String,
}

#[derive(Deserialize)]
pub struct ManualProfilesRequest {
    profile_urls: Vec<String>,
}

#[derive(Serialize)]
pub struct JobStarted {
    job_id: Uuid,
    status: &'static str,
    message: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api_root))
        .route("/api/process-post", post(api_process_post))
        .route("/api/process-manual-profiles", post(api_process_manual_profiles))
        .route("/api/job-status/{job_id}", get(api_job_status))
        .with_state(state)
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({"detail": message.into()}))).into_response()
}

pub async fn api_root() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Lead profiling API is running"}))
}

pub async fn api_process_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PostRequest>,
) -> Response {
    let post_ref = body.post_url.trim();
    if post_ref.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "post_url is required");
    }

    let post_id = extract_post_id(post_ref);
    let job_id = state.orchestrator.submit_post(post_ref).await;
    info!(%job_id, post_id = post_id.as_str(), "Post job started");

    Json(JobStarted {
        job_id,
        status: "started",
        message: format!("Processing started for post {post_id}"),
    })
    .into_response()
}

/// Trimmed, non-blank URLs, or a message naming up to three offenders.
pub fn validate_profile_urls(urls: &[String]) -> Result<Vec<String>, String> {
    let cleaned: Vec<String> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        return Err("No valid profile URLs provided".to_string());
    }

    let invalid: Vec<&str> = cleaned
        .iter()
        .filter(|url| !(url.to_lowercase().contains("linkedin.com/in/") || url.starts_with('/')))
        .map(String::as_str)
        .collect();

    if !invalid.is_empty() {
        let shown: Vec<&str> = invalid.iter().take(3).copied().collect();
        return Err(format!("Invalid LinkedIn profile URLs: {}", shown.join(", ")));
    }

    Ok(cleaned)
}

pub async fn api_process_manual_profiles(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ManualProfilesRequest>,
) -> Response {
    let urls = match validate_profile_urls(&body.profile_urls) {
        Ok(urls) => urls,
        Err(message) => {
            warn!(reason = message.as_str(), "Rejected manual profile submission");
            return detail(StatusCode::BAD_REQUEST, message);
        }
    };

    let count = urls.len();
    let job_id = state.orchestrator.submit_profiles(urls).await;
    info!(%job_id, count, "Manual profile job started");

    Json(JobStarted {
        job_id,
        status: "started",
        message: format!("Processing started for {count} profiles"),
    })
    .into_response()
}

pub async fn api_job_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(id) = Uuid::parse_str(&job_id) else {
        return detail(StatusCode::NOT_FOUND, "Job not found");
    };

    match state.orchestrator.registry().status(id).await {
        Ok(view) => Json(view).into_response(),
        Err(LeadScoutError::JobNotFound(_)) => detail(StatusCode::NOT_FOUND, "Job not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use leadscout_common::PipelineSettings;
    use leadscout_pipeline::testing::*;
    use leadscout_pipeline::JobRegistry;

    fn app(world: &MockWorld) -> Router {
        router(Arc::new(AppState {
            orchestrator: world.orchestrator(JobRegistry::new(), PipelineSettings::default()),
        }))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn validation_lists_first_three_offenders() {
        let urls: Vec<String> = ["a", "b", "https://www.linkedin.com/in/ada", "c", "d"]
            .map(String::from)
            .to_vec();
        assert_eq!(
            validate_profile_urls(&urls).unwrap_err(),
            "Invalid LinkedIn profile URLs: a, b, c"
        );
    }

    #[test]
    fn validation_accepts_mixed_case_and_relative_paths() {
        let urls = vec![
            " https://WWW.LinkedIn.com/in/Ada ".to_string(),
            "/in/bob".to_string(),
            "".to_string(),
        ];
        assert_eq!(
            validate_profile_urls(&urls).unwrap(),
            vec!["https://WWW.LinkedIn.com/in/Ada", "/in/bob"]
        );
    }

    #[tokio::test]
    async fn root_reports_running() {
        let app = app(&MockWorld::new(MockProfiles::new()));
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Lead profiling API is running");
    }

    #[tokio::test]
    async fn blank_manual_submission_is_rejected() {
        let app = app(&MockWorld::new(MockProfiles::new()));
        let (status, body) = send(
            &app,
            post_json("/api/process-manual-profiles", json!({"profile_urls": ["  ", ""]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "No valid profile URLs provided");
    }

    #[tokio::test]
    async fn blank_post_url_is_rejected() {
        let app = app(&MockWorld::new(MockProfiles::new()));
        let (status, _) = send(&app, post_json("/api/process-post", json!({"post_url": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_or_malformed_job_id_is_404() {
        let app = app(&MockWorld::new(MockProfiles::new()));

        let (status, body) = send(&app, get(&format!("/api/job-status/{}", Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Job not found");

        let (status, _) = send(&app, get("/api/job-status/not-a-uuid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn manual_job_runs_to_completion_through_the_api() {
        let world = MockWorld::new(MockProfiles::new().on(
            &profile_url("ada"),
            profile_json("Ada Lovelace", None, Some("Acme Voice")),
        ));
        let app = app(&world);

        let (status, started) = send(
            &app,
            post_json(
                "/api/process-manual-profiles",
                json!({"profile_urls": [profile_url("ada"), profile_url("ghost")]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["status"], "started");
        assert_eq!(started["message"], "Processing started for 2 profiles");
        let job_id = started["job_id"].as_str().unwrap().to_string();

        let mut view = Value::Null;
        for _ in 0..200 {
            let (status, body) = send(&app, get(&format!("/api/job-status/{job_id}"))).await;
            assert_eq!(status, StatusCode::OK);
            view = body;
            if view["status"] != "running" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(view["status"], "completed");
        assert_eq!(view["job_id"], job_id.as_str());
        assert_eq!(view["progress"]["current"], 2);
        assert_eq!(view["results"][0]["name"], "Ada Lovelace");
        assert_eq!(view["results"][0]["icp_fit_strength"], "High");
        assert_eq!(view["results"][0]["validation_judgement"], "Correct");
        assert_eq!(view["skipped_profiles"][0]["urn"], "ghost");
        assert!(view["completed_at"].is_string());
        assert!(view["error"].is_null());
    }

    #[tokio::test]
    async fn post_submission_reports_extracted_post_id() {
        let world = MockWorld::new(MockProfiles::new())
            .with_reactions(MockReactions::new().on_post("7312345678", vec![]));
        let app = app(&world);

        let (status, started) = send(
            &app,
            post_json(
                "/api/process-post",
                json!({"post_url": "https://www.linkedin.com/feed/update/7312345678/"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["message"], "Processing started for post 7312345678");
    }
}
