pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::goals::handlers as goals;
use crate::plan::handlers as plan;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route("/api/v1/assessments", post(assessment::handle_create_assessment))
        .route(
            "/api/v1/assessments/current",
            get(assessment::handle_current_assessment),
        )
        .route(
            "/api/v1/assessments/current/report",
            get(assessment::handle_assessment_report),
        )
        .route(
            "/api/v1/assessments/history",
            get(assessment::handle_assessment_history),
        )
        // Plan API
        .route("/api/v1/plans/current", get(plan::handle_current_plan))
        .route(
            "/api/v1/plans/regenerate",
            post(plan::handle_regenerate_plan),
        )
        // Goals API
        .route("/api/v1/goals/parse", post(goals::handle_parse_goals))
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
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::DisabledGenerator;
    use crate::plan::{PlanCache, PlanPolicy};
    use crate::profile::InMemoryProfileStore;

    fn test_state() -> AppState {
        AppState {
            llm: Arc::new(DisabledGenerator),
            profiles: Arc::new(InMemoryProfileStore::new()),
            plans: Arc::new(PlanCache::new(PlanPolicy::default())),
            config: Config {
                anthropic_api_key: None,
                redis_url: None,
                port: 0,
                rust_log: "info".to_string(),
                plan_policy: PlanPolicy::default(),
            },
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(get("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["llm"], "disabled");
    }

    #[tokio::test]
    async fn test_assessment_then_plan_flow() {
        let state = test_state();
        let profile = Uuid::new_v4();

        let response = build_router(state.clone())
            .oneshot(post_json(
                "/api/v1/assessments",
                json!({"profile_id": profile, "resume_text": "4 years of Python and React"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let assessment = body_json(response).await;
        assert_eq!(assessment["metadata"]["confidence"], json!(0.6));

        let response = build_router(state.clone())
            .oneshot(get(&format!("/api/v1/plans/current?profile_id={profile}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let plan = body_json(response).await;
        assert!(plan["shortTermGoals"].as_array().is_some_and(|g| !g.is_empty()));

        let response = build_router(state.clone())
            .oneshot(get(&format!(
                "/api/v1/assessments/current/report?profile_id={profile}"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/markdown"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("# Ability Assessment Report"));

        let response = build_router(state)
            .oneshot(get(&format!("/api/v1/assessments/history?profile_id={profile}")))
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_empty_input_is_bad_request() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/assessments",
                json!({"profile_id": Uuid::new_v4(), "resume_text": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_assessment_is_not_found() {
        let profile = Uuid::new_v4();
        let response = build_router(test_state())
            .oneshot(get(&format!("/api/v1/plans/current?profile_id={profile}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/plans/regenerate",
                json!({"profile_id": profile}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_goal_parse_failure_is_reported_in_body() {
        let response = build_router(test_state())
            .oneshot(post_json(
                "/api/v1/goals/parse",
                json!({"profile_id": Uuid::new_v4(), "text": "learn rust"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
