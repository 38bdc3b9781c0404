use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::schema::{TripPlan, TripRequest};

pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to plan trip";

/// The remote collaborator that builds trip plans.
#[async_trait]
pub trait PlanningService: Send + Sync {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan>;
}

/// HTTP client for `POST /api/plan_trip`. One request per call, no retries.
#[derive(Clone)]
pub struct PlanningServiceClient {
    client: Client,
    endpoint: String,
}

impl PlanningServiceClient {
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlannerError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.plan_trip_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlanningService for PlanningServiceClient {
    async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan> {
        debug!(endpoint = %self.endpoint, city = %request.city, origin = %request.origin, "posting trip request");

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "planning service responded");
        interpret_response(status, &body)
    }
}

/// Parses the body as JSON before looking at `status`: the service puts
/// error detail in the body even on failure.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<TripPlan> {
    let data: Value = serde_json::from_slice(body)?;

    if !status.is_success() {
        return Err(PlannerError::RequestFailed(failure_message(&data)));
    }

    Ok(serde_json::from_value(data)?)
}

fn failure_message(data: &Value) -> String {
    data.get("error")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .unwrap_or(DEFAULT_FAILURE_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as MockStatus, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    async fn spawn_planning_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock planning service");
        let addr = listener.local_addr().expect("listener addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock server");
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> PlanningServiceClient {
        let config = PlannerConfig::new(base_url).expect("valid base url");
        PlanningServiceClient::new(&config).expect("client")
    }

    fn paris() -> TripRequest {
        TripRequest::new("Paris", "JFK", "2026-11-03")
    }

    #[test]
    fn failure_uses_error_field() {
        let err = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error":"timeout"}"#,
        )
        .unwrap_err();
        assert_eq!(err, PlannerError::RequestFailed("timeout".to_string()));
        assert_eq!(err.to_string(), "timeout");
    }

    #[test]
    fn failure_without_error_field_uses_default() {
        let bodies: [&[u8]; 4] = [b"{}", br#"{"error":""}"#, br#"{"error":null}"#, b"[]"];
        for body in bodies {
            let err = interpret_response(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err();
            assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn non_string_error_field_uses_default() {
        let bodies: [&[u8]; 3] = [
            br#"{"error":42}"#,
            br#"{"error":{"code":500}}"#,
            br#"{"error":["timeout"]}"#,
        ];
        for body in bodies {
            let err = interpret_response(StatusCode::BAD_REQUEST, body).unwrap_err();
            assert_eq!(err, PlannerError::RequestFailed(DEFAULT_FAILURE_MESSAGE.to_string()));
        }
    }

    #[test]
    fn non_json_body_is_transport_error_regardless_of_status() {
        for status in [StatusCode::OK, StatusCode::BAD_GATEWAY] {
            let err = interpret_response(status, b"<html>Bad Gateway</html>").unwrap_err();
            assert!(matches!(err, PlannerError::Transport(_)), "got {:?}", err);
        }
    }

    #[test]
    fn success_decodes_plan() {
        let plan = interpret_response(
            StatusCode::OK,
            br#"{"summary":"ok","raw_data":{"flights":[],"activities":["Louvre"]}}"#,
        )
        .unwrap();
        assert_eq!(plan.summary.as_deref(), Some("ok"));
        assert_eq!(plan.raw_data.activities, vec!["Louvre"]);
        assert!(plan.metadata.is_none());
    }

    #[test]
    fn success_with_non_object_json_is_transport_error() {
        let err = interpret_response(StatusCode::OK, b"[1,2,3]").unwrap_err();
        assert!(matches!(err, PlannerError::Transport(_)));
    }

    #[tokio::test]
    async fn posts_request_body_and_decodes_plan() {
        let seen: Arc<Mutex<Vec<serde_json::Value>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_handler = Arc::clone(&seen);
        let router = Router::new().route(
            "/api/plan_trip",
            post(move |Json(body): Json<serde_json::Value>| {
                let seen = Arc::clone(&seen_handler);
                async move {
                    seen.lock().expect("seen lock").push(body);
                    Json(json!({
                        "summary": "Here is your AI-Generated trip plan for Paris.",
                        "raw_data": {
                            "flights": [{"airline": "Fallback Airlines", "flight_number": "FA-123", "source": "mock"}],
                            "activities": ["Louvre"]
                        },
                        "metadata": {"services_used": ["flight", "knowledge", "rag"]}
                    }))
                }
            }),
        );
        let base = spawn_planning_service(router).await;

        let plan = client_for(&base).plan_trip(&paris()).await.unwrap();
        assert_eq!(plan.summary_text(), "Here is your AI-Generated trip plan for Paris.");
        assert!(plan.raw_data.flights[0].is_mock());

        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            json!({"city": "Paris", "origin": "JFK", "travel_date": "2026-11-03"})
        );
    }

    #[tokio::test]
    async fn server_error_surfaces_body_message() {
        let router = Router::new().route(
            "/api/plan_trip",
            post(|| async {
                (
                    MockStatus::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "error": "The Flight Agent is unavailable.",
                        "details": "connection refused"
                    })),
                )
            }),
        );
        let base = spawn_planning_service(router).await;

        let err = client_for(&base).plan_trip(&paris()).await.unwrap_err();
        assert_eq!(
            err,
            PlannerError::RequestFailed("The Flight Agent is unavailable.".to_string())
        );
    }

    #[tokio::test]
    async fn html_error_page_is_transport_error() {
        let router = Router::new().route(
            "/api/plan_trip",
            post(|| async { (MockStatus::INTERNAL_SERVER_ERROR, "<h1>Internal Server Error</h1>") }),
        );
        let base = spawn_planning_service(router).await;

        let err = client_for(&base).plan_trip(&paris()).await.unwrap_err();
        assert!(matches!(err, PlannerError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .plan_trip(&paris())
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Transport(_)));
    }
}
