use std::path::Path;
use std::time::Duration;
use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{parse_config, DentalConfig};
use crate::errors::DentalError;
use tracing::info;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

pub async fn handle_serve(args: ServeArgs) -> Result<(), DentalError> {
    let config = match &args.config {
        Some(path) => parse_config(Path::new(path)).await?,
        None => DentalConfig::default(),
    };
    let server = config.server();
    let host = args.host.unwrap_or(server.host);
    let port = args.port.unwrap_or(server.port);

    info!(host = %host, port, "Starting API server");

    let state = api::create_app_state(&config);

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.purge_expired();
        }
    });

    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| DentalError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
