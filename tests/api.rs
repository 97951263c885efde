use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use chrono::Duration;
use http_body_util::BodyExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tower::ServiceExt;
use dental_iq::api::{build_router, AppState};
use dental_iq::agents::simulator::MAX_ROWS_PER_BATCH;
use dental_iq::config::SimulationConfig;
use dental_iq::errors::DentalError;
use dental_iq::llm::{ChatProvider, LLMResponse, Message};
use dental_iq::session::SessionStore;

/// Records every request and answers with a fixed reply.
struct FakeProvider {
    requests: Mutex<Vec<Vec<Message>>>,
}

#[async_trait]
impl ChatProvider for FakeProvider {
    async fn chat(&self, messages: &[Message]) -> Result<LLMResponse, DentalError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        Ok(LLMResponse {
            content: "Isabella has 2 open issues.".into(),
            input_tokens: Some(100),
            output_tokens: Some(8),
            model: "fake-model".into(),
        })
    }

    fn provider_name(&self) -> &str { "fake" }
    fn model_name(&self) -> &str { "fake-model" }
}

struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn chat(&self, _messages: &[Message]) -> Result<LLMResponse, DentalError> {
        Err(DentalError::Network("connection refused".into()))
    }

    fn provider_name(&self) -> &str { "failing" }
    fn model_name(&self) -> &str { "none" }
}

fn create_test_state(chat: Option<Arc<dyn ChatProvider>>) -> AppState {
    AppState {
        sessions: Arc::new(SessionStore::new(Duration::minutes(30))),
        chat,
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(2024))),
        simulation: SimulationConfig::default(),
        history_limit: 10,
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

async fn login(state: &AppState, user_id: &str, client_id: &str, password: &str) -> String {
    let req = make_request("POST", "/api/login", None, Some(json!({
        "user_id": user_id,
        "client_id": client_id,
        "password": password,
    })));
    let response = app(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

async fn login_admin(state: &AppState) -> String {
    login(state, "admin", "client001", "admin123").await
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state(None);
    let req = make_request("GET", "/api/health", None, None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dental-iq");
}

#[tokio::test]
async fn test_login_returns_user_without_hash() {
    let state = create_test_state(None);
    let req = make_request("POST", "/api/login", None, Some(json!({
        "user_id": "dr_novak",
        "client_id": "clinic_dental",
        "password": "dental2024",
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["expires_at"].is_string());
    assert_eq!(body["user"]["name"], "Dr. Novák");
    assert_eq!(body["user"]["job_role"], "doctor");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_bad_password() {
    let state = create_test_state(None);
    let req = make_request("POST", "/api/login", None, Some(json!({
        "user_id": "admin",
        "client_id": "client001",
        "password": "wrong",
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let state = create_test_state(None);
    let req = make_request("GET", "/api/dashboard", None, None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Missing Authorization header"));

    let req = make_request("GET", "/api/dashboard", Some("not-a-session"), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let mut state = create_test_state(None);
    state.sessions = Arc::new(SessionStore::new(Duration::zero()));
    let token = login_admin(&state).await;

    let req = make_request("GET", "/api/me", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/logout", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["logged_out"], true);

    let req = make_request("GET", "/api/me", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_welcome_shown_once() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("GET", "/api/dashboard", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["show_welcome"], true);
    assert_eq!(body["agents"].as_array().unwrap().len(), 5);
    assert_eq!(body["simulate_active"], false);
    assert!(body["selected_agent"].is_null());
    assert_eq!(body["user_info"]["user_id"], "admin");

    let req = make_request("GET", "/api/dashboard", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["show_welcome"], false);
}

#[tokio::test]
async fn test_dashboard_filtered_by_job_role() {
    let state = create_test_state(None);
    let token = login(&state, "receptionist", "clinic_dental", "reception123").await;

    let req = make_request("GET", "/api/agents", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["isabella", "leo", "gabriel"]);
}

#[tokio::test]
async fn test_get_agent_not_found_and_forbidden() {
    let state = create_test_state(None);
    let token = login(&state, "dr_novak", "clinic_dental", "dental2024").await;

    let req = make_request("GET", "/api/agents/zeus", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["error"], "Not found: Unknown agent: zeus");

    let req = make_request("GET", "/api/agents/isabella", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let req = make_request("GET", "/api/agents/nora", Some(&token), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Nora");
    assert_eq!(body["rows"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_simulate_isabella_three_rows() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/agents/isabella/simulate", Some(&token), Some(json!({"rows": 3})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["agent_id"], "isabella");
    assert_eq!(body["total_rows"], 11);
    let rows = body["generated"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        for key in ["patient", "callReason", "request", "time", "outcome", "narrative"] {
            assert!(row.get(key).is_some(), "missing {}", key);
        }
        if row["outcome"] == "confirmed" {
            assert_eq!(row["narrative"], "");
        } else {
            assert_ne!(row["narrative"], "");
        }
    }

    // Appended to the session copy.
    let req = make_request("GET", "/api/agents/isabella", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_simulate_default_batch_sizes() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/agents/leo/simulate", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["generated"].as_array().unwrap().len(), 12);
    assert_eq!(body["total_rows"], 20);

    let req = make_request("POST", "/api/agents/auditor/simulate", Some(&token), Some(json!({})));
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    let rows = body["generated"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r["narrative"] != ""));
}

#[tokio::test]
async fn test_simulate_zero_rows_changes_nothing() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/agents/nora/simulate", Some(&token), Some(json!({"rows": 0})));
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert!(body["generated"].as_array().unwrap().is_empty());
    assert_eq!(body["total_rows"], 8);
}

#[tokio::test]
async fn test_simulate_negative_rows_is_bad_request() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/agents/gabriel/simulate", Some(&token), Some(json!({"rows": -1})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let req = make_request("GET", "/api/agents/gabriel", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_simulate_oversized_batch_rejected_and_server_keeps_working() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    for rows in [json!(i64::MAX), json!(1_000_000_000_000i64), json!(MAX_ROWS_PER_BATCH + 1)] {
        let req = make_request("POST", "/api/agents/isabella/simulate", Some(&token), Some(json!({"rows": rows})));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let req = make_request("POST", "/api/agents/isabella/simulate", Some(&token), Some(json!({"rows": 1})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["total_rows"], 9);
}

#[tokio::test]
async fn test_simulate_recovers_poisoned_random_source() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let rng = state.rng.clone();
    let _ = std::thread::spawn(move || {
        let _guard = rng.lock().unwrap();
        panic!("poison the random source");
    })
    .join();
    assert!(state.rng.is_poisoned());

    let req = make_request("POST", "/api/agents/leo/simulate", Some(&token), Some(json!({"rows": 2})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = make_request("PUT", "/api/simulation", Some(&token), Some(json!({"active": true, "agent_id": "nora"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_simulate_checks_existence_before_access() {
    let state = create_test_state(None);
    let token = login(&state, "dr_novak", "clinic_dental", "dental2024").await;

    let req = make_request("POST", "/api/agents/zeus/simulate", Some(&token), Some(json!({"rows": 1})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let req = make_request("POST", "/api/agents/leo/simulate", Some(&token), Some(json!({"rows": 1})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_simulated_rows_stay_in_their_session() {
    let state = create_test_state(None);
    let first = login_admin(&state).await;
    let second = login_admin(&state).await;

    let req = make_request("POST", "/api/agents/leo/simulate", Some(&first), Some(json!({"rows": 4})));
    assert_eq!(app(&state).oneshot(req).await.unwrap().status(), StatusCode::OK);

    let req = make_request("GET", "/api/agents/leo", Some(&second), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_simulation_toggle() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("PUT", "/api/simulation", Some(&token), Some(json!({"active": true, "agent_id": "gabriel"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["simulate_active"], true);
    assert_eq!(body["selected_agent"], "gabriel");
    assert_eq!(body["generated"], 12);

    let req = make_request("GET", "/api/dashboard", Some(&token), None);
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["simulate_active"], true);
    let gabriel = body["agents"].as_array().unwrap().iter().find(|a| a["id"] == "gabriel").unwrap().clone();
    assert_eq!(gabriel["rows"].as_array().unwrap().len(), 20);

    let req = make_request("PUT", "/api/simulation", Some(&token), Some(json!({"active": false})));
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["simulate_active"], false);
    assert!(body["selected_agent"].is_null());
    assert_eq!(body["generated"], 0);
}

#[tokio::test]
async fn test_simulation_toggle_forbidden_agent() {
    let state = create_test_state(None);
    let token = login(&state, "receptionist", "clinic_dental", "reception123").await;

    let req = make_request("PUT", "/api/simulation", Some(&token), Some(json!({"active": true, "agent_id": "auditor"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_chat_unconfigured_is_unavailable() {
    let state = create_test_state(None);
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": "Hello"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_chat_empty_message() {
    let provider = Arc::new(FakeProvider { requests: Mutex::new(Vec::new()) });
    let state = create_test_state(Some(provider.clone()));
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": "   "})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(provider.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_uses_visible_agents_and_records_history() {
    let provider = Arc::new(FakeProvider { requests: Mutex::new(Vec::new()) });
    let state = create_test_state(Some(provider.clone()));
    let token = login(&state, "dr_novak", "clinic_dental", "dental2024").await;

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": "Any audit issues?"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["response"], "Isabella has 2 open issues.");

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": "Thanks"})));
    assert_eq!(app(&state).oneshot(req).await.unwrap().status(), StatusCode::OK);

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);

    let first = &requests[0];
    assert_eq!(first.len(), 3);
    assert!(first[1].content.contains("Agent: Nora"));
    assert!(first[1].content.contains("Agent: Auditor"));
    assert!(!first[1].content.contains("Agent: Isabella"));

    // Second call carries the first exchange as history.
    let second = &requests[1];
    assert_eq!(second.len(), 5);
    assert_eq!(second[2], Message::user("Any audit issues?"));
    assert_eq!(second[3], Message::assistant("Isabella has 2 open issues."));
    assert_eq!(second[4], Message::user("Thanks"));
}

#[tokio::test]
async fn test_chat_session_history_stays_bounded() {
    let provider = Arc::new(FakeProvider { requests: Mutex::new(Vec::new()) });
    let mut state = create_test_state(Some(provider.clone()));
    state.history_limit = 2;
    let token = login_admin(&state).await;

    for message in ["one", "two", "three"] {
        let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": message})));
        assert_eq!(app(&state).oneshot(req).await.unwrap().status(), StatusCode::OK);
    }

    let session = state.sessions.get(&token).unwrap();
    let dashboard = session.dashboard.read().await;
    assert_eq!(dashboard.chat_history.len(), 2);
    assert_eq!(dashboard.chat_history[0].text, "three");

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[2].len(), 5);
    assert_eq!(requests[2][2], Message::user("two"));
}

#[tokio::test]
async fn test_chat_explicit_history_overrides_session() {
    let provider = Arc::new(FakeProvider { requests: Mutex::new(Vec::new()) });
    let state = create_test_state(Some(provider.clone()));
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({
        "message": "And Leo?",
        "history": [
            {"who": "user", "text": "How is Isabella?"},
            {"who": "bot", "text": "Fine."}
        ]
    })));
    assert_eq!(app(&state).oneshot(req).await.unwrap().status(), StatusCode::OK);

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[0].len(), 5);
    assert_eq!(requests[0][3], Message::assistant("Fine."));
}

#[tokio::test]
async fn test_chat_upstream_failure_is_bad_gateway() {
    let state = create_test_state(Some(Arc::new(FailingProvider)));
    let token = login_admin(&state).await;

    let req = make_request("POST", "/api/chat", Some(&token), Some(json!({"message": "Hello"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
