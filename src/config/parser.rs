use std::path::Path;
use crate::agents::simulator::MAX_ROWS_PER_BATCH;
use crate::errors::DentalError;
use super::types::DentalConfig;
use tracing::info;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<DentalConfig, DentalError> {
    if !path.exists() {
        return Err(DentalError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(DentalError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config_str(content: &str) -> Result<DentalConfig, DentalError> {
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(DentalConfig::default());
    }
    let config: DentalConfig = serde_yaml::from_str(content)?;
    validate_conflicts(&config)?;
    Ok(config)
}

/// Reject values that parse but cannot work.
fn validate_conflicts(config: &DentalConfig) -> Result<(), DentalError> {
    if let Some(server) = &config.server {
        if server.port == 0 {
            return Err(DentalError::Config("server.port must be non-zero".into()));
        }
    }

    if let Some(session) = &config.session {
        if session.ttl_minutes <= 0 {
            return Err(DentalError::Config(format!(
                "session.ttl_minutes must be positive, got {}",
                session.ttl_minutes
            )));
        }
    }

    if let Some(chat) = &config.chat {
        if !(0.0..=2.0).contains(&chat.temperature) {
            return Err(DentalError::Config(format!(
                "chat.temperature must be within 0..=2, got {}",
                chat.temperature
            )));
        }
        if chat.max_tokens == 0 {
            return Err(DentalError::Config("chat.max_tokens must be positive".into()));
        }
    }

    if let Some(sim) = &config.simulation {
        if sim.default_rows < 0 || sim.audit_rows < 0 {
            return Err(DentalError::Config("simulation row counts must be non-negative".into()));
        }
        if sim.default_rows > MAX_ROWS_PER_BATCH || sim.audit_rows > MAX_ROWS_PER_BATCH {
            return Err(DentalError::Config(format!(
                "simulation row counts must not exceed {}",
                MAX_ROWS_PER_BATCH
            )));
        }
    }

    Ok(())
}
