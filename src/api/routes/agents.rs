use std::sync::{Arc, PoisonError};
use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};
use tracing::info;
use crate::agents::{simulator, AgentId, AgentRecord, RowRecord};
use crate::api::models::{SimulateRequest, SimulateResponse, SimulationStatus, SimulationToggle};
use crate::api::AppState;
use crate::auth::ensure_access;
use crate::errors::DentalError;
use crate::session::Session;

pub async fn list_agents(Extension(session): Extension<Arc<Session>>) -> Json<Vec<AgentRecord>> {
    let dashboard = session.dashboard.read().await;
    Json(dashboard.visible_agents(session.user.job_role.allowed_agents()))
}

pub async fn get_agent(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> Result<Json<AgentRecord>, DentalError> {
    let agent = resolve_agent(&session, &id)?;
    let dashboard = session.dashboard.read().await;
    dashboard
        .agent(agent)
        .cloned()
        .map(Json)
        .ok_or_else(|| DentalError::NotFound(format!("Unknown agent: {}", id)))
}

pub async fn simulate_agent(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<SimulateResponse>, DentalError> {
    let agent = resolve_agent(&session, &id)?;
    let request: SimulateRequest = if body.is_empty() {
        SimulateRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| DentalError::InvalidArgument(format!("Invalid request body: {}", e)))?
    };
    let row_count = request.rows.unwrap_or_else(|| state.simulation.rows_for(agent));

    let generated = generate_rows(&state, agent, row_count)?;
    let total_rows = append_rows(&session, agent, generated.clone()).await?;

    info!(
        user_id = %session.user.user_id,
        agent = %agent,
        rows = generated.len(),
        total_rows,
        "Simulated rows appended"
    );
    Ok(Json(SimulateResponse { agent_id: agent, generated, total_rows }))
}

/// Toggle simulation mode. Switching it on for an agent appends one default
/// batch of rows to that agent.
pub async fn set_simulation(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Json(body): Json<SimulationToggle>,
) -> Result<Json<SimulationStatus>, DentalError> {
    let selected = match (body.active, body.agent_id.as_deref()) {
        (true, Some(id)) if !id.is_empty() => Some(resolve_agent(&session, id)?),
        _ => None,
    };

    let mut generated = 0;
    if let Some(agent) = selected {
        let rows = generate_rows(&state, agent, state.simulation.rows_for(agent))?;
        generated = rows.len();
        append_rows(&session, agent, rows).await?;
    }

    let mut dashboard = session.dashboard.write().await;
    dashboard.simulate_active = body.active;
    dashboard.selected_agent = selected;

    info!(
        user_id = %session.user.user_id,
        active = body.active,
        agent = ?selected,
        generated,
        "Simulation toggled"
    );
    Ok(Json(SimulationStatus {
        simulate_active: dashboard.simulate_active,
        selected_agent: dashboard.selected_agent,
        generated,
    }))
}

/// Catalog existence first (404), then visibility (403).
fn resolve_agent(session: &Session, id: &str) -> Result<AgentId, DentalError> {
    let agent: AgentId = id.parse()?;
    ensure_access(&session.user, agent)?;
    Ok(agent)
}

/// The count is checked before the shared random source is locked. A
/// poisoned lock still holds a usable generator, so it is recovered.
fn generate_rows(state: &AppState, agent: AgentId, row_count: i64) -> Result<Vec<RowRecord>, DentalError> {
    simulator::validate_row_count(row_count)?;
    let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
    simulator::generate(agent, row_count, &mut *rng)
}

/// Rows are appended only after the whole batch was generated.
async fn append_rows(session: &Session, agent: AgentId, rows: Vec<RowRecord>) -> Result<usize, DentalError> {
    let mut dashboard = session.dashboard.write().await;
    let record = dashboard
        .agent_mut(agent)
        .ok_or_else(|| DentalError::NotFound(format!("Unknown agent: {}", agent)))?;
    record.append_rows(rows);
    Ok(record.rows.len())
}
