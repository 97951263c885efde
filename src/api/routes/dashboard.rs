use std::sync::Arc;
use axum::{Extension, Json};
use crate::api::models::DashboardPayload;
use crate::session::Session;

/// Dashboard payload for the current user. The welcome flag is shown once.
pub async fn get_dashboard(Extension(session): Extension<Arc<Session>>) -> Json<DashboardPayload> {
    let mut dashboard = session.dashboard.write().await;
    let show_welcome = std::mem::replace(&mut dashboard.show_welcome, false);

    Json(DashboardPayload {
        agents: dashboard.visible_agents(session.user.job_role.allowed_agents()),
        simulate_active: dashboard.simulate_active,
        selected_agent: dashboard.selected_agent,
        user_info: session.user.clone(),
        show_welcome,
    })
}
