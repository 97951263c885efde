pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::{Arc, Mutex};
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use crate::config::{DentalConfig, SimulationConfig};
use crate::llm::{create_provider, ChatProvider};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub chat: Option<Arc<dyn ChatProvider>>,
    /// Random source for mock data; seedable for reproducible demos.
    pub rng: Arc<Mutex<StdRng>>,
    pub simulation: SimulationConfig,
    pub history_limit: usize,
}

pub fn create_app_state(config: &DentalConfig) -> AppState {
    let simulation = config.simulation();
    let rng = match simulation.seed {
        Some(seed) => {
            info!(seed, "Seeding mock data generator");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let chat = config.chat();

    AppState {
        sessions: Arc::new(SessionStore::new(Duration::minutes(config.session().ttl_minutes))),
        chat: create_provider(&chat),
        rng: Arc::new(Mutex::new(rng)),
        simulation,
        history_limit: chat.history_limit,
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/logout", post(routes::session::logout))
        .route("/api/me", get(routes::session::me))
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/agents", get(routes::agents::list_agents))
        .route("/api/agents/{id}", get(routes::agents::get_agent))
        .route("/api/agents/{id}/simulate", post(routes::agents::simulate_agent))
        .route("/api/simulation", put(routes::agents::set_simulation))
        .route("/api/chat", post(routes::chat::chat))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/login", post(routes::session::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
