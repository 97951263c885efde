use std::sync::Arc;
use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use crate::api::models::LoginRequest;
use crate::api::AppState;
use crate::auth::{verify_credentials, UserInfo};
use crate::errors::DentalError;
use crate::session::{Session, SessionInfo};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionInfo>, DentalError> {
    let user = verify_credentials(&body.user_id, &body.client_id, &body.password)?;
    let session = state.sessions.create(user);
    Ok(Json(SessionInfo::from(session.as_ref())))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Json<Value> {
    let removed = state.sessions.remove(&session.token);
    Json(json!({"logged_out": removed}))
}

pub async fn me(Extension(session): Extension<Arc<Session>>) -> Json<UserInfo> {
    Json(session.user.clone())
}
