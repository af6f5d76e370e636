use axum::extract::State;

use crate::{
    pkg::server::state::AppState,
    prelude::{Result, TrackerError},
};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    state
        .jobs
        .ping()
        .await
        .map_err(|e| TrackerError::Unhealthy(e.to_string()))?;
    tracing::debug!("service is healthy");
    Ok(())
}
