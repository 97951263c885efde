use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use crate::errors::DentalError;
use super::AppState;

/// Resolve the bearer token to a live session and attach it to the request.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let Some(token) = token else {
        return DentalError::Authentication("Missing Authorization header".into()).into_response();
    };

    match state.sessions.get(&token) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => DentalError::Authentication("Invalid or expired session".into()).into_response(),
    }
}
